use crate::language::{StringInterner, InternSymbol};
use crate::parser::fundef::{ParamList, ParamDef};
use crate::transform::errors::{TransformError, ErrorKind};


/*
    Structural constraints over a parameter list:

      - all public entries precede all private entries
      - every private, non-rest entry carries a default expression
      - no two entries share a name, regardless of visibility
      - a rest entry may not be private

    The check is pure and total, and reports the first violation encountered
    in declaration order so diagnostics are reproducible. The parser already
    rejects any parameter after a rest parameter, so under the ordering rule
    a rest parameter can never coexist with private parameters.
*/
pub fn check_params(params: &ParamList, interner: &StringInterner) -> Result<(), TransformError> {
    let mut seen_names: Vec<InternSymbol> = Vec::with_capacity(params.len());
    let mut seen_private = false;

    for (position, param) in params.iter().enumerate() {
        if param.is_private() && param.is_rest() {
            return Err(param_error(ErrorKind::PrivateRestParameterRejected, param, position, interner));
        }

        if !param.is_private() && seen_private {
            return Err(param_error(ErrorKind::OrderingViolation, param, position, interner));
        }

        if param.is_private() && !param.is_rest() && param.default.is_none() {
            return Err(param_error(ErrorKind::MissingDefaultForPrivateParameter, param, position, interner));
        }

        if seen_names.contains(&param.name) {
            return Err(param_error(ErrorKind::DuplicateParameterName, param, position, interner));
        }

        seen_names.push(param.name);
        seen_private |= param.is_private();
    }

    Ok(())
}

fn param_error(kind: ErrorKind, param: &ParamDef, position: usize, interner: &StringInterner) -> TransformError {
    let name = interner.resolve(param.name).unwrap_or("<unknown>");
    TransformError::new(kind, name, position, param.symbol)
}

use std::rc::Rc;
use static_assertions::const_assert_eq;
use crate::language::{IntType, FloatType, InternSymbol, StringInterner};
use crate::runtime::function::{Function, NativeFunction};
use crate::runtime::forward::Forwarding;
use crate::runtime::errors::{ExecResult, ErrorKind};


// keep the value representation at tag + pointer-sized payload
#[cfg(target_pointer_width = "64")]
const_assert_eq!(core::mem::size_of::<Variant>(), 16);

// Fundamental data value type
#[derive(Debug, Clone)]
pub enum Variant {
    Nil,
    BoolTrue,
    BoolFalse,

    Integer(IntType),
    Float(FloatType),

    String(InternSymbol),

    List(Rc<Vec<Variant>>),

    Function(Rc<Function>),
    NativeFunction(Rc<NativeFunction>),

    // the rewriter's capability object wrapping an inner closure
    Forwarding(Rc<Forwarding>),
}

impl Variant {
    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }

    pub fn truth_value(&self) -> bool {
        !matches!(self, Variant::Nil | Variant::BoolFalse)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::BoolTrue | Self::BoolFalse => "bool",
            Self::Integer(..) => "int",
            Self::Float(..) => "float",
            Self::String(..) => "string",
            Self::List(..) => "list",
            Self::Function(..) | Self::NativeFunction(..) | Self::Forwarding(..) => "function",
        }
    }

    pub fn as_string(&self) -> Option<InternSymbol> {
        match self {
            Self::String(symbol) => Some(*symbol),
            _ => None,
        }
    }

    // value equality; reference equality for functions and lists of them
    pub fn cmp_eq(&self, other: &Variant) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::BoolTrue, Self::BoolTrue) => true,
            (Self::BoolFalse, Self::BoolFalse) => true,

            (Self::Integer(lhs), Self::Integer(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Integer(lhs), Self::Float(rhs)) => (*lhs as FloatType) == *rhs,
            (Self::Float(lhs), Self::Integer(rhs)) => *lhs == (*rhs as FloatType),

            (Self::String(lhs), Self::String(rhs)) => lhs == rhs,

            (Self::List(lhs), Self::List(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().zip(rhs.iter()).all(|(lhs, rhs)| lhs.cmp_eq(rhs))
            },

            (Self::Function(lhs), Self::Function(rhs)) => Rc::ptr_eq(lhs, rhs),
            (Self::NativeFunction(lhs), Self::NativeFunction(rhs)) => Rc::ptr_eq(lhs, rhs),
            (Self::Forwarding(lhs), Self::Forwarding(rhs)) => Rc::ptr_eq(lhs, rhs),

            _ => false,
        }
    }

    /*
        Attribute protocol: the five structural operations on a function's
        identity. On a forwarding capability every one of these is redirected
        to the outer function object; only call behavior stays with the
        wrapped closure. Reading an absent attribute yields nil.
    */

    pub fn get_attr(&self, name: InternSymbol) -> ExecResult<Variant> {
        match self {
            Self::Function(fun) => Ok(fun.get_attr(name).unwrap_or(Variant::Nil)),
            Self::Forwarding(fwd) => Ok(fwd.target().get_attr(name).unwrap_or(Variant::Nil)),
            _ => Err(ErrorKind::NoAttributes(self.type_name()).into()),
        }
    }

    pub fn set_attr(&self, name: InternSymbol, value: Variant) -> ExecResult<()> {
        match self {
            Self::Function(fun) => { fun.set_attr(name, value); Ok(()) },
            Self::Forwarding(fwd) => { fwd.target().set_attr(name, value); Ok(()) },
            _ => Err(ErrorKind::NoAttributes(self.type_name()).into()),
        }
    }

    pub fn del_attr(&self, name: InternSymbol) -> ExecResult<bool> {
        match self {
            Self::Function(fun) => Ok(fun.del_attr(name).is_some()),
            Self::Forwarding(fwd) => Ok(fwd.target().del_attr(name).is_some()),
            _ => Err(ErrorKind::NoAttributes(self.type_name()).into()),
        }
    }

    pub fn has_attr(&self, name: InternSymbol) -> ExecResult<bool> {
        match self {
            Self::Function(fun) => Ok(fun.has_attr(name)),
            Self::Forwarding(fwd) => Ok(fwd.target().has_attr(name)),
            _ => Err(ErrorKind::NoAttributes(self.type_name()).into()),
        }
    }

    pub fn attr_names(&self) -> ExecResult<Vec<InternSymbol>> {
        match self {
            Self::Function(fun) => Ok(fun.attr_names()),
            Self::Forwarding(fwd) => Ok(fwd.target().attr_names()),
            _ => Err(ErrorKind::NoAttributes(self.type_name()).into()),
        }
    }

    // rendering for `echo`; needs the interner to resolve strings
    pub fn echo_str(&self, interner: &StringInterner) -> String {
        match self {
            Self::Nil => "nil".to_string(),
            Self::BoolTrue => "true".to_string(),
            Self::BoolFalse => "false".to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(symbol) => interner.resolve(*symbol).unwrap_or("<string>").to_string(),
            Self::List(items) => {
                let items: Vec<String> = items.iter()
                    .map(|item| item.echo_str(interner))
                    .collect();
                format!("[{}]", items.join(", "))
            },
            Self::Function(..) | Self::Forwarding(..) => "<function>".to_string(),
            Self::NativeFunction(fun) => format!("<built-in function {}>", fun.name()),
        }
    }
}


impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        match value {
            true => Self::BoolTrue,
            false => Self::BoolFalse,
        }
    }
}

impl From<IntType> for Variant {
    fn from(value: IntType) -> Self { Self::Integer(value) }
}

impl From<FloatType> for Variant {
    fn from(value: FloatType) -> Self { Self::Float(value) }
}

impl From<Function> for Variant {
    fn from(fun: Function) -> Self {
        Self::Function(Rc::new(fun))
    }
}

impl From<NativeFunction> for Variant {
    fn from(fun: NativeFunction) -> Self {
        Self::NativeFunction(Rc::new(fun))
    }
}

impl From<Forwarding> for Variant {
    fn from(fwd: Forwarding) -> Self {
        Self::Forwarding(Rc::new(fwd))
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(items: Vec<Variant>) -> Self {
        Self::List(Rc::new(items))
    }
}

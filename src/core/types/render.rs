use std::fmt;

use super::Type;

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Primitive(kind) => write!(f, "{}", kind.keyword()),
            Type::Boxed(kind) => write!(f, "{}", kind.box_name()),
            Type::String => write!(f, "String"),
            Type::Object => write!(f, "Object"),
            Type::Named { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    let args = args.iter().map(Type::to_string).collect::<Vec<_>>();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            Type::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

mod parser;

pub(crate) use parser::*;

pub const DATATYPE_FLAG_IS_SIGNED: u32 = 0b1;
pub const DATATYPE_FLAG_IS_STATIC: u32 = 0b10;
pub const DATATYPE_FLAG_IS_CONST: u32 = 0b100;
pub const DATATYPE_FLAG_IS_POINTER: u32 = 0b1000;
pub const DATATYPE_FLAG_IS_ARRAY: u32 = 0b10000;
pub const DATATYPE_FLAG_IS_EXTERN: u32 = 0b100000;
pub const DATATYPE_FLAG_IS_RESTRICT: u32 = 0b1000000;
pub const DATATYPE_FLAG_IGNORE_TYPECHECK: u32 = 0b10000000;
pub const DATATYPE_FLAG_IS_SECONDARY: u32 = 0b100000000;
pub const DATATYPE_FLAG_STRUCT_UNION_NO_NAME: u32 = 0b1000000000;
pub const DATATYPE_FLAG_IS_LITERAL: u32 = 0b10000000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatatypeKind {
    Void,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Struct,
    Union,
    Unknown,
}

/// A resolved declaration type: primitive or struct/union, with modifier
/// flags, an optional secondary type for two-word spellings such as
/// `long long`, and the pointer depth counted from the declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct Datatype {
    pub flags: u32,
    pub kind: DatatypeKind,
    pub secondary: Option<Box<Datatype>>,
    pub type_str: String,
    pub size: usize,
    pub pointer_depth: usize,
}

impl Default for Datatype {
    fn default() -> Self {
        Datatype {
            flags: 0,
            kind: DatatypeKind::Unknown,
            secondary: None,
            type_str: String::new(),
            size: 0,
            pointer_depth: 0,
        }
    }
}

impl Datatype {
    pub fn is_signed(&self) -> bool {
        self.flags & DATATYPE_FLAG_IS_SIGNED != 0
    }

    pub fn is_pointer(&self) -> bool {
        self.flags & DATATYPE_FLAG_IS_POINTER != 0
    }

    pub fn is_struct_or_union(&self) -> bool {
        matches!(self.kind, DatatypeKind::Struct | DatatypeKind::Union)
    }
}

/// Storage size of a primitive type spelling. Pointers and secondary
/// spellings adjust this afterwards.
pub fn primitive_size(kind: DatatypeKind) -> usize {
    match kind {
        DatatypeKind::Void => 0,
        DatatypeKind::Char => 1,
        DatatypeKind::Short => 2,
        DatatypeKind::Int => 4,
        DatatypeKind::Long => 4,
        DatatypeKind::Float => 4,
        DatatypeKind::Double => 4,
        DatatypeKind::Struct | DatatypeKind::Union | DatatypeKind::Unknown => 0,
    }
}

//! C identifier hygiene and the source-type → C-type mapping (spec §4.4).

use pyrinas_language::Ty;

pub(super) fn is_c_reserved(name: &str) -> bool {
    matches!(
        name,
        // C keywords
        "auto" | "break" | "case" | "char" | "const" | "continue" | "default"
            | "do" | "double" | "else" | "enum" | "extern" | "float" | "for" | "goto"
            | "if" | "int" | "long" | "register" | "return" | "short" | "signed"
            | "sizeof" | "static" | "struct" | "switch" | "typedef" | "union"
            | "unsigned" | "void" | "volatile" | "while"
            // C99/C11/C23 reserved words
            | "inline" | "restrict" | "_Bool" | "_Complex" | "_Imaginary"
            | "_Alignas" | "_Alignof" | "_Atomic" | "_Generic" | "_Noreturn"
            | "_Static_assert" | "_Thread_local"
            | "true" | "false" | "nullptr" | "alignas" | "alignof"
            | "constexpr" | "static_assert" | "thread_local" | "typeof"
            // runtime/libc identifiers we reserve to avoid collisions
            | "printf" | "malloc" | "calloc" | "realloc" | "free"
            | "Result" | "ResultType" | "Value" | "OK" | "ERR"
            | "main" | "argc" | "argv"
    )
}

pub(super) fn escape_c_ident(name: &str) -> String {
    if is_c_reserved(name) {
        format!("pyr_{name}")
    } else {
        name.to_string()
    }
}

/// Maps a pyrinas source type to the C type emitted for it (spec §4.4 "Type
/// mapping"). `ptr[T]`/`array[T, N]` both decay to `<map(T)>*`; `Result[_,_]`
/// always becomes the runtime's fixed tagged union regardless of its type
/// arguments, since the runtime contract has one `Result` shape for every
/// instantiation (spec §6 "Runtime contract").
pub(super) fn c_type_str(ty: &Ty) -> String {
    match ty {
        Ty::Int => "int".to_string(),
        Ty::Float => "float".to_string(),
        Ty::Bool => "int".to_string(),
        Ty::Str => "char*".to_string(),
        Ty::Void => "void".to_string(),
        Ty::None => "void*".to_string(),
        Ty::Ptr(inner) => format!("{}*", c_type_str(inner)),
        Ty::Array(inner, _) => format!("{}*", c_type_str(inner)),
        Ty::Result(_, _) => "Result".to_string(),
        Ty::User(name) => format!("struct {}", escape_c_ident(name)),
    }
}

/// The `printf` conversion used by `print(x)`, chosen from `x`'s static type
/// (spec §4.4 "print specialization").
pub(super) fn printf_format(ty: &Ty) -> &'static str {
    match ty {
        Ty::Float => "%f",
        Ty::Str => "%s",
        _ => "%d",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_c_keywords() {
        assert_eq!(escape_c_ident("int"), "pyr_int");
        assert_eq!(escape_c_ident("node"), "node");
    }

    #[test]
    fn maps_pointer_and_array_to_same_decayed_shape() {
        let ptr = Ty::Ptr(Box::new(Ty::Int));
        let arr = Ty::Array(Box::new(Ty::Int), 4);
        assert_eq!(c_type_str(&ptr), "int*");
        assert_eq!(c_type_str(&arr), "int*");
    }

    #[test]
    fn result_always_maps_to_runtime_union() {
        let r = Ty::Result(Box::new(Ty::Int), Box::new(Ty::Str));
        assert_eq!(c_type_str(&r), "Result");
    }
}

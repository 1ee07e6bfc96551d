//! Documentation tables for builtin functions and string methods.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinInfo {
    pub name: &'static str,
    pub signature: &'static str,
    pub doc: &'static str,
    pub params: &'static [&'static str],
}

const fn info(
    name: &'static str,
    signature: &'static str,
    doc: &'static str,
    params: &'static [&'static str],
) -> BuiltinInfo {
    BuiltinInfo {
        name,
        signature,
        doc,
        params,
    }
}

pub static BUILTINS: &[BuiltinInfo] = &[
    info("print", "print(...args) -> nil", "Prints each argument.", &["...args"]),
    info(
        "len",
        "len(x) -> int",
        "Length of a string, list or dict. Any other type is an error.",
        &["x"],
    ),
    info("str", "str(x) -> string", "Converts a value to string.", &["x"]),
    info(
        "join",
        "join(array, sep) -> string",
        "Joins a list of strings with a separator.",
        &["array", "sep"],
    ),
    info("keys", "keys(dict) -> [key]", "Keys of a dict in a stable order.", &["dict"]),
    info(
        "values",
        "values(dict) -> [value]",
        "Values of a dict, in the same order as keys().",
        &["dict"],
    ),
    info(
        "range",
        "range(n) | range(start, end) | range(start, end, step) -> [int]",
        "Ints from start up to end, exclusive.",
        &["n|start", "end?", "step?"],
    ),
    info(
        "append",
        "append(array, value) -> [any]",
        "Returns a new list with value added at the end.",
        &["array", "value"],
    ),
    info("push", "push(array, value) -> [any]", "Alias of append.", &["array", "value"]),
    info(
        "count",
        "count(array, value) -> int",
        "Number of elements equal to value.",
        &["array", "value"],
    ),
    info(
        "remove",
        "remove(array, value) -> bool",
        "Removes the first matching element and reports whether one was found.",
        &["array", "value"],
    ),
    info(
        "get",
        "get(dict, key, default?) -> any",
        "Value for key, otherwise default or nil.",
        &["dict", "key", "default?"],
    ),
    info(
        "pop",
        "pop(array) -> any | pop(dict, key, default?) -> any",
        "Removes the last list element, or a dict entry by key.",
        &["array|dict", "key?", "default?"],
    ),
    info("hasKey", "hasKey(dict, key) -> bool", "True if dict has key.", &["dict", "key"]),
    info(
        "sort",
        "sort(array) -> [any]",
        "Returns a new sorted list of all ints or all strings.",
        &["array"],
    ),
    info(
        "max",
        "max(array) -> number|string",
        "Largest element of a list of numbers or strings.",
        &["array"],
    ),
    info("abs", "abs(x) -> number", "Absolute value of an int or float.", &["x"]),
    info("sum", "sum(array) -> number", "Sum of numeric elements; 0 for an empty list.", &["array"]),
    info(
        "reverse",
        "reverse(array|string) -> array|string",
        "Returns a reversed copy.",
        &["array|string"],
    ),
    info(
        "any",
        "any(array) -> bool",
        "True if any element is truthy. Only false and nil are falsy.",
        &["array"],
    ),
    info(
        "all",
        "all(array) -> bool",
        "True if every element is truthy; true for an empty list.",
        &["array"],
    ),
    info(
        "error",
        "error(message, code?) -> Error",
        "Builds an error value without throwing it.",
        &["message", "code?"],
    ),
    info(
        "writeFile",
        "writeFile(path, content) -> nil",
        "Writes a string to disk.",
        &["path", "content"],
    ),
    info("sqrt", "sqrt(x) -> float", "Square root.", &["x"]),
    info("input", "input(prompt?) -> string", "Reads a line from stdin.", &["prompt?"]),
    info(
        "getpass",
        "getpass(prompt?) -> string",
        "Reads a line from stdin without echo when possible.",
        &["prompt?"],
    ),
    info(
        "group_digits",
        "group_digits(x, sep=\",\", group=3) -> string",
        "Groups integer digits from the right.",
        &["x", "sep?", "group?"],
    ),
    info(
        "format_float",
        "format_float(x, decimals) -> string",
        "Formats a number with a fixed number of decimals.",
        &["x", "decimals"],
    ),
    info(
        "format_percent",
        "format_percent(x, decimals) -> string",
        "Formats x * 100 with decimals and a trailing '%'.",
        &["x", "decimals"],
    ),
];

/// Methods available on string values.
pub static METHODS: &[BuiltinInfo] = &[
    info("strip", "strip() -> string", "Removes leading and trailing whitespace.", &[]),
    info(
        "capitalize",
        "capitalize() -> string",
        "Uppercases the first character and lowercases the rest.",
        &[],
    ),
    info("uppercase", "uppercase() -> string", "Uppercase copy of the string.", &[]),
    info("lowercase", "lowercase() -> string", "Lowercase copy of the string.", &[]),
    info(
        "startswith",
        "startswith(prefix) -> bool",
        "True if the string begins with prefix.",
        &["prefix"],
    ),
    info(
        "endswith",
        "endswith(suffix) -> bool",
        "True if the string ends with suffix.",
        &["suffix"],
    ),
    info(
        "slice",
        "slice(low?, high?) -> string",
        "Substring with the same bounds rules as s[low:high].",
        &["low?", "high?"],
    ),
];

static BUILTIN_MAP: Lazy<FxHashMap<&'static str, &'static BuiltinInfo>> =
    Lazy::new(|| BUILTINS.iter().map(|b| (b.name, b)).collect());

static METHOD_MAP: Lazy<FxHashMap<&'static str, &'static BuiltinInfo>> =
    Lazy::new(|| METHODS.iter().map(|m| (m.name, m)).collect());

pub fn builtin(name: &str) -> Option<&'static BuiltinInfo> {
    BUILTIN_MAP.get(name).copied()
}

pub fn method(name: &str) -> Option<&'static BuiltinInfo> {
    METHOD_MAP.get(name).copied()
}

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_MAP.contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let len = builtin("len").unwrap();
        assert_eq!(len.signature, "len(x) -> int");
        assert_eq!(len.params, &["x"]);
        assert!(builtin("strip").is_none());
        assert_eq!(method("slice").unwrap().params, &["low?", "high?"]);
    }

    #[test]
    fn test_tables_have_unique_names() {
        assert_eq!(BUILTIN_MAP.len(), BUILTINS.len());
        assert_eq!(METHOD_MAP.len(), METHODS.len());
        assert!(BUILTINS.iter().all(|b| b.signature.starts_with(b.name)));
    }
}

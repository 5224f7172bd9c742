//! Built-in functions a program may call without defining them. Only the
//! ones a program actually calls end up in the generated output.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Intrinsic {
    pub name: &'static str,
    pub source: &'static str,
}

const ADD: Intrinsic = Intrinsic {
    name: "add",
    source: "function add(x, y) {
    return x + y;
}",
};

const LOG: Intrinsic = Intrinsic {
    name: "log",
    source: "function log(value) {
    console.log(value);
    return value;
}",
};

lazy_static! {
    static ref LIBRARY: BTreeMap<&'static str, Intrinsic> = [ADD, LOG]
        .iter()
        .map(|intrinsic| (intrinsic.name, *intrinsic))
        .collect();
}

pub fn lookup(name: &str) -> Option<&'static Intrinsic> {
    LIBRARY.get(name)
}

pub fn is_intrinsic(name: &str) -> bool {
    lookup(name).is_some()
}

/// Every intrinsic, ordered by name.
pub fn entries() -> impl Iterator<Item = &'static Intrinsic> {
    LIBRARY.values()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_works() {
        assert_eq!(lookup("add").map(|i| i.name), Some("add"));
        assert!(lookup("log").unwrap().source.contains("console.log(value);"));
        assert_eq!(lookup("sub"), None);
    }

    #[test]
    fn is_intrinsic_works() {
        assert!(is_intrinsic("log"));
        assert!(is_intrinsic("add"));
        assert!(!is_intrinsic("main"));
        assert!(!is_intrinsic("Log"));
    }

    #[test]
    fn entries_are_sorted() {
        let names: Vec<&str> = entries().map(|i| i.name).collect();
        assert_eq!(names, vec!["add", "log"]);
    }

    #[test]
    fn sources_define_their_name() {
        for intrinsic in entries() {
            let header = format!("function {}(", intrinsic.name);
            assert!(intrinsic.source.starts_with(&header));
        }
    }
}

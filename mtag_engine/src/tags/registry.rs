//! Parser registration data exposed to host tooling
//!
//! Hosts dispatch files to the engine by extension and render tags using
//! the kind table. Both are fixed contracts.

use super::record::TagKind;

/// One entry in the kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDefinition {
    pub enabled: bool,
    pub letter: char,
    pub name: &'static str,
    pub plural: &'static str,
}

/// The full kind table, in stable order.
pub const MATLAB_KINDS: [KindDefinition; 4] = [
    KindDefinition {
        enabled: true,
        letter: 'c',
        name: "class",
        plural: "classes",
    },
    KindDefinition {
        enabled: true,
        letter: 'f',
        name: "field",
        plural: "fields",
    },
    KindDefinition {
        enabled: true,
        letter: 'm',
        name: "method",
        plural: "methods",
    },
    KindDefinition {
        enabled: true,
        letter: 'F',
        name: "function",
        plural: "functions",
    },
];

/// Registration record a host uses to wire this engine in.
#[derive(Debug, Clone, Copy)]
pub struct ParserRegistration {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub kinds: &'static [KindDefinition],
}

/// Registration for MATLAB-like sources: files with the `m` extension
pub fn matlab_parser() -> ParserRegistration {
    ParserRegistration {
        name: "MatLab",
        extensions: &["m"],
        kinds: &MATLAB_KINDS,
    }
}

/// Look up the kind table entry for a tag kind
pub fn kind_definition(kind: TagKind) -> &'static KindDefinition {
    match kind {
        TagKind::Class => &MATLAB_KINDS[0],
        TagKind::Property => &MATLAB_KINDS[1],
        TagKind::Method => &MATLAB_KINDS[2],
        TagKind::Function => &MATLAB_KINDS[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_record() {
        let reg = matlab_parser();
        assert_eq!(reg.name, "MatLab");
        assert_eq!(reg.extensions, &["m"]);
        assert_eq!(reg.kinds.len(), 4);
    }

    #[test]
    fn test_kind_table_matches_tag_kinds() {
        for kind in [
            TagKind::Class,
            TagKind::Property,
            TagKind::Method,
            TagKind::Function,
        ] {
            let def = kind_definition(kind);
            assert_eq!(def.letter, kind.letter());
            assert_eq!(def.name, kind.name());
            assert!(def.enabled);
        }
    }
}

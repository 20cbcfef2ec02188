//! Tag data model, kind registry, and sinks

pub mod record;
pub mod registry;
pub mod sink;

pub use record::{TagKind, TagRecord, TagScope};
pub use registry::{kind_definition, matlab_parser, KindDefinition, ParserRegistration};
pub use sink::{CollectingSink, TagSink};

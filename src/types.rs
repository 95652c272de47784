use serde_json::{Map, Value};

/// Metadata carried alongside an attachment and persisted by the host library.
pub type Metadata = Map<String, Value>;

/// Explicit go-ahead for destructive bulk deletes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Confirm;

use lavaflow_core_types::RunId;
use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Validation
    InvalidInput,
    InvalidGeometry,
    InvalidTimestamp,
    DuplicateId,

    // Geometry
    UnrepairableGeometry,

    // Store
    /// Explicit absence signal from a document store
    NotFound,
    /// A document write was rejected by the store
    WriteRejected,

    // Integration/IO
    SourceFetch,
    Io,
    Serialization,
    Persistence,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidGeometry => "ERR_INVALID_GEOMETRY",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::UnrepairableGeometry => "ERR_UNREPAIRABLE_GEOMETRY",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::WriteRejected => "ERR_WRITE_REJECTED",
            ExErrorKind::SourceFetch => "ERR_SOURCE_FETCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, snapshot id, run id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (snapshot or record id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// True when the error is the store's explicit "not found" signal
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (id: {})", entity_id)?;
        }
        if let Some(run_id) = &self.run_id {
            write!(f, " (run: {})", run_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised while building and diffing footprints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// A geometry object is not a polygon or multipolygon
    #[error("Unsupported geometry type: {geometry_type}")]
    UnsupportedGeometry { geometry_type: String },

    /// A ring or position is structurally malformed
    #[error("Malformed geometry: {reason}")]
    MalformedGeometry { reason: String },

    /// Geometry could not be made valid by any repair strategy
    #[error("Geometry of snapshot {snapshot_id} could not be repaired")]
    Unrepairable { snapshot_id: String },

    /// Snapshot area is negative or not finite
    #[error("Invalid area {area} for snapshot {snapshot_id}")]
    InvalidArea { snapshot_id: String, area: f64 },

    /// Two snapshots share the same identifier
    #[error("Duplicate snapshot id: {snapshot_id}")]
    DuplicateSnapshot { snapshot_id: String },

    /// Serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<FootprintError> for ExError {
    fn from(err: FootprintError) -> Self {
        match err {
            FootprintError::UnsupportedGeometry { geometry_type } => {
                ExError::new(ExErrorKind::InvalidGeometry)
                    .with_message(format!("Unsupported geometry type: {}", geometry_type))
            }
            FootprintError::MalformedGeometry { reason } => {
                ExError::new(ExErrorKind::InvalidGeometry).with_message(reason)
            }
            FootprintError::Unrepairable { snapshot_id } => {
                ExError::new(ExErrorKind::UnrepairableGeometry)
                    .with_entity_id(snapshot_id)
                    .with_message("Geometry could not be repaired")
            }
            FootprintError::InvalidArea { snapshot_id, area } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(snapshot_id)
                    .with_message(format!("Invalid area {}", area))
            }
            FootprintError::DuplicateSnapshot { snapshot_id } => {
                ExError::new(ExErrorKind::DuplicateId)
                    .with_entity_id(snapshot_id)
                    .with_message("Duplicate snapshot id")
            }
            FootprintError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for FootprintError {
    fn from(err: serde_json::Error) -> Self {
        FootprintError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::from(FootprintError::from(err))
    }
}

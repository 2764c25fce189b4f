use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used across the prediction core.
pub type Result<T> = std::result::Result<T, RopErr>;

/// The prediction core's error type.
#[derive(Debug)]
pub enum RopErr {
    /// An artifact file does not exist at its resolved path.
    MissingArtifact {
        artifact: &'static str,
        path: PathBuf,
    },
    /// A file exists but could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A file was read but is not valid JSON for its artifact kind.
    Parse {
        artifact: &'static str,
        source: serde_json::Error,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An artifact declares feature names that disagree with the fixed column order.
    FeatureMismatch {
        artifact: &'static str,
        position: usize,
        expected: &'static str,
        got: String,
    },
    InvalidTree {
        tree: usize,
        node: usize,
        reason: String,
    },
    UnsupportedModel(String),
    /// A scaler artifact whose fitted parameters cannot describe a transform.
    InvalidScaler(String),
    /// A stage of the pipeline produced NaN or an infinity.
    NonFinite {
        stage: &'static str,
        position: Option<usize>,
    },
}

impl Display for RopErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RopErr::MissingArtifact { artifact, path } => {
                write!(f, "{artifact} file not found at {}", path.display())
            }
            RopErr::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            RopErr::Parse { artifact, source } => write!(f, "invalid {artifact} file: {source}"),
            RopErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "{what} has {got} entries, expected {expected}"),
            RopErr::FeatureMismatch {
                artifact,
                position,
                expected,
                got,
            } => write!(
                f,
                "{artifact} feature {position} is '{got}', expected '{expected}'"
            ),
            RopErr::InvalidTree { tree, node, reason } => {
                write!(f, "tree {tree} node {node}: {reason}")
            }
            RopErr::UnsupportedModel(msg) => write!(f, "unsupported model: {msg}"),
            RopErr::InvalidScaler(msg) => write!(f, "invalid scaler: {msg}"),
            RopErr::NonFinite {
                stage,
                position: Some(position),
            } => write!(f, "{stage} produced a non-finite value at feature {position}"),
            RopErr::NonFinite {
                stage,
                position: None,
            } => write!(f, "{stage} produced a non-finite value"),
        }
    }
}

impl Error for RopErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RopErr::Io { source, .. } => Some(source),
            RopErr::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

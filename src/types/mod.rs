pub mod download;
pub mod response;

pub use download::{DownloadFormat, DownloadRequest, ResultKind};
pub use response::{AnalysisRequest, AnalysisResult};

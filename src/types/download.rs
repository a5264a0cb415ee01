use std::fmt;
use std::str::FromStr;

/// File format served by `GET /download/{format}/{type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DownloadFormat {
    Txt,
    Docx,
    Pdf,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

/// Which cached text a download is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResultKind {
    Cleaned,
    Optimized,
    Final,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::Optimized => "optimized",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cleaned" => Ok(Self::Cleaned),
            "optimized" | "rewritten" => Ok(Self::Optimized),
            "final" => Ok(Self::Final),
            other => anyhow::bail!("Unknown result type: {}. Use cleaned, optimized, or final", other),
        }
    }
}

/// A download ready to be fetched: where from and what to save it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: reqwest::Url,
    pub file_name: String,
}

pub fn download_file_name(format: DownloadFormat, kind: ResultKind) -> String {
    format!("{}_resume.{}", kind, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_kind_from_str() {
        assert_eq!("Final".parse::<ResultKind>().unwrap(), ResultKind::Final);
        assert_eq!("rewritten".parse::<ResultKind>().unwrap(), ResultKind::Optimized);
        assert!("raw".parse::<ResultKind>().is_err());
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name(DownloadFormat::Docx, ResultKind::Optimized),
            "optimized_resume.docx"
        );
    }
}

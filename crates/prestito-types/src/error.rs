use thiserror::Error;

/// User-input validation failures.
///
/// Always recovered locally by re-prompting the same conversation state;
/// never surfaced as a crash.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("invalid duration: '{0}'")]
    InvalidDuration(String),
}

/// Failures from the payment calculator.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("term must be at least one month")]
    ZeroTerm,

    #[error("payment out of representable range")]
    OutOfRange,
}

/// Failures while composing or writing the output document.
///
/// Any of these aborts the whole render; no partially-written byte stream
/// is ever returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("content stream encoding failed: {0}")]
    ContentEncoding(String),

    #[error("page tree assembly failed: {0}")]
    PageTree(String),

    #[error("image encoding failed: {0}")]
    ImageEncoding(String),

    #[error("document serialization failed: {0}")]
    Write(String),
}

/// Failure while handing a produced document back through the transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to write document '{filename}': {source}")]
    FileWrite {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidAmount("abc".to_string());
        assert_eq!(err.to_string(), "invalid amount: 'abc'");

        let err = ParseError::InvalidDuration("molti".to_string());
        assert_eq!(err.to_string(), "invalid duration: 'molti'");
    }

    #[test]
    fn test_finance_error_display() {
        assert_eq!(
            FinanceError::ZeroTerm.to_string(),
            "term must be at least one month"
        );
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::ImageEncoding("bad jpeg".to_string());
        assert_eq!(err.to_string(), "image encoding failed: bad jpeg");
    }

    #[test]
    fn test_delivery_error_preserves_source() {
        let err = DeliveryError::FileWrite {
            filename: "Contratto_Mario_Rossi.pdf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("Contratto_Mario_Rossi.pdf"));
    }
}

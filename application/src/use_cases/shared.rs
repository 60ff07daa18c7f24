//! Helpers shared by use cases.

use super::process_message::ProcessMessageError;
use tokio_util::sync::CancellationToken;

/// Return early if the cancellation token has fired.
pub(crate) fn check_cancelled(
    token: &Option<CancellationToken>,
) -> Result<(), ProcessMessageError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(ProcessMessageError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(&Some(token)),
            Err(ProcessMessageError::Cancelled)
        ));
    }
}

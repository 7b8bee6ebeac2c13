/// Blocking user dialogs the controllers rely on.
///
/// `alert` must not return until the user has seen the message; `confirm`
/// returns the user's answer. The terminal presenter implements both on
/// stdin/stderr.
pub trait Interaction: Send + Sync {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;
}

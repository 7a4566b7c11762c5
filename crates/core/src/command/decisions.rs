use crate::error::Result;

/// Answer to a decision point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    /// A free-form value instead of one of the offered options
    Other(String),
    Cancelled,
}

/// Interactive decision points of the commands.
///
/// The engine never prompts on its own; whoever drives a command decides
/// how questions are answered.
pub trait Decisions {
    /// Pick one of `options` by index. With `allow_other` a custom value may
    /// be given instead.
    fn choose(&self, prompt: &str, options: &[String], allow_other: bool) -> Result<Choice<usize>>;

    /// Free text, `default` offered when present
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<Choice<String>>;
}

/// Takes the first option and every default without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Decisions for AcceptDefaults {
    fn choose(&self, _prompt: &str, options: &[String], _allow_other: bool) -> Result<Choice<usize>> {
        Ok(if options.is_empty() {
            Choice::Cancelled
        } else {
            Choice::Selected(0)
        })
    }

    fn input(&self, _prompt: &str, default: Option<&str>) -> Result<Choice<String>> {
        Ok(match default {
            Some(value) => Choice::Selected(value.to_string()),
            None => Choice::Cancelled,
        })
    }
}

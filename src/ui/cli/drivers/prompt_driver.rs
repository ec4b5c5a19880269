use anyhow::Result;

/// Terminal interaction used by the wizard. Implemented by [`InquireDriver`]
/// for real sessions and by a scripted stub in tests.
///
/// [`InquireDriver`]: super::InquireDriver
pub trait PromptDriver {
    /// Picks one of `options`, returning its index.
    fn choose(&self, prompt: &str, help: Option<&str>, options: &[String]) -> Result<usize>;
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;

    /// Shows a block of output to the user.
    fn show(&self, text: &str) {
        println!("{text}");
    }

    /// Reports a recoverable input problem.
    fn complain(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}

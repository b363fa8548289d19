use studyhall_core::types::DEFAULT_SUBJECT;

/// Arguments of `studyhall ask`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskArgs {
    pub question: String,
    pub subject: String,
    pub top_k: usize,
}

/// Parse `"<question>" [--subject S] [--top-k N]`. The last positional
/// argument is the question; unknown flags are ignored.
pub fn parse_ask_args(args: &[String], default_top_k: usize) -> Result<AskArgs, String> {
    let mut question = None;
    let mut subject = DEFAULT_SUBJECT.to_string();
    let mut top_k = default_top_k;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--subject" | "-s" => {
                subject = iter.next().ok_or("--subject requires a value")?.clone();
            }
            "--top-k" | "-k" => {
                let value = iter.next().ok_or("--top-k requires a number")?;
                top_k = value.parse().map_err(|_| format!("--top-k requires a number, got '{}'", value))?;
            }
            other if !other.starts_with('-') => question = Some(other.to_string()),
            _ => {}
        }
    }

    let question = question.filter(|q| !q.trim().is_empty()).ok_or("question is required")?;
    Ok(AskArgs { question, subject, top_k })
}

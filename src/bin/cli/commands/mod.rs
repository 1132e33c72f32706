pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod review;
pub mod show;

use std::io::{BufRead, Write};

use anyhow::Result;
use serde_json::Value;

use flashback_lib::flashbacks::Flashback;

/// Print `message` and read one line of input, `None` at end of input
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask a yes/no question; anything other than "y"/"yes" is a no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<bool> {
    let answer = prompt(input, output, &format!("{} [y/N] ", message))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes")
    ))
}

/// JSON shape used for a single card in `--format json` output
pub fn flashback_json(position: usize, flashback: &Flashback) -> Value {
    serde_json::json!({
        "position": position,
        "id": flashback.id.to_string(),
        "question": flashback.question,
        "answer": flashback.answer,
        "days": flashback.days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let mut input = Cursor::new("  hello  \n");
        let mut output = Vec::new();

        let line = prompt(&mut input, &mut output, "Say: ").unwrap();
        assert_eq!(line.as_deref(), Some("hello"));
        assert_eq!(String::from_utf8(output).unwrap(), "Say: ");
    }

    #[test]
    fn test_prompt_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(prompt(&mut input, &mut output, "> ").unwrap(), None);
    }

    #[test]
    fn test_confirm() {
        for (reply, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut input = Cursor::new(reply);
            let mut output = Vec::new();
            assert_eq!(confirm(&mut input, &mut output, "Sure?").unwrap(), expected, "reply {:?}", reply);
        }
    }
}

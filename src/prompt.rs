use std::io::{self, BufRead, Write};

/// Ask a yes/no question; anything but an explicit yes (including EOF) is no
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        let accepted = confirm("Rename 2 ebuilds?", &mut input, &mut output).unwrap();
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  yes  \n").0);
    }

    #[test]
    fn test_other_answers_decline() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("sure\n").0);
    }

    #[test]
    fn test_eof_declines() {
        let (accepted, output) = ask("");
        assert!(!accepted);
        assert!(output.starts_with("Rename 2 ebuilds? [y/N]"));
    }
}

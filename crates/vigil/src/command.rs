// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shell command parsing.
//!
//! Lines starting with `/` are commands; anything else is a credential to
//! analyze. The tactical sub-mode has its own command set.

use std::str::FromStr;

use chrono::NaiveDate;
use vigil_core::CaptureKind;
use vigil_mutation::Affordance;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(String),
    BoostAuto,
    BoostManual,
    Voice(Vec<u8>),
    Retina(Vec<u8>),
    Bio(Option<String>),
    Save,
    Vault(Option<CaptureKind>),
    Trash,
    Report,
    Status,
    Delete(String),
    Restore(String),
    Purge(String),
    Describe(String, Option<String>),
    Expire(String, Option<NaiveDate>),
    Reveal(String),
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TacticalCommand {
    Apply(Affordance),
    Preview(Affordance),
    Unpreview,
    Select(usize, usize),
    Edit(String),
    Show,
    Commit,
    Cancel,
    Help,
}

pub const HELP: &str = "\
  <text>                analyze a credential
  /boost auto|manual    strengthen the current credential
  /voice n...           analyze a voice print from frame peaks (0-255)
  /retina n...          analyze a retina scan from RGBA bytes
  /bio [device-id]      analyze a biometric token
  /save                 archive the analyzed credential
  /vault [kind]         list active entries
  /trash                list the recycle bin
  /report               expiry summary
  /status               current analysis
  /delete ID            move to recycle bin
  /restore ID           restore from recycle bin
  /purge ID             permanently remove a trashed entry
  /describe ID [text]   set or clear a description
  /expire ID DATE|none  set or clear the expiry date (YYYY-MM-DD)
  /reveal ID            show a secret
  /reset                clear the analysis
  /quit                 exit";

pub const TACTICAL_HELP: &str = "\
  /sym I, /suf I, /sub I   apply a suggestion
  /preview sym|suf|sub I   preview a suggestion
  /unpreview               drop the preview
  /select A B              select a range (character offsets)
  /edit TEXT               replace the buffer
  /show                    show buffer and suggestions
  /commit                  analyze the buffer
  /cancel                  discard the session";

fn split(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

fn bytes(rest: &str) -> Result<Vec<u8>, String> {
    rest.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| u8::from_str(s).map_err(|_| format!("`{s}` is not a value in 0..=255")))
        .collect()
}

fn index(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("`{s}` is not an index"))
}

fn affordance(kind: &str, at: &str) -> Result<Affordance, String> {
    let i = index(at)?;
    match kind {
        "sym" => Ok(Affordance::Symbol(i)),
        "suf" => Ok(Affordance::Suffix(i)),
        "sub" => Ok(Affordance::Substitution(i)),
        other => Err(format!("unknown suggestion kind `{other}`")),
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    if !line.trim_start().starts_with('/') {
        return Ok(Command::Analyze(line.to_string()));
    }
    let (head, rest) = split(line);
    let command = match head {
        "/boost" => match rest {
            "auto" => Command::BoostAuto,
            "manual" => Command::BoostManual,
            _ => return Err("usage: /boost auto|manual".to_string()),
        },
        "/voice" => Command::Voice(bytes(rest)?),
        "/retina" => Command::Retina(bytes(required(rest, "/retina n...")?)?),
        "/bio" => Command::Bio((!rest.is_empty()).then(|| rest.to_string())),
        "/save" => Command::Save,
        "/vault" => Command::Vault(if rest.is_empty() {
            None
        } else {
            Some(CaptureKind::from_str(rest).map_err(|_| format!("unknown kind `{rest}`"))?)
        }),
        "/trash" => Command::Trash,
        "/report" => Command::Report,
        "/status" => Command::Status,
        "/delete" => Command::Delete(required(rest, "/delete ID")?.to_string()),
        "/restore" => Command::Restore(required(rest, "/restore ID")?.to_string()),
        "/purge" => Command::Purge(required(rest, "/purge ID")?.to_string()),
        "/reveal" => Command::Reveal(required(rest, "/reveal ID")?.to_string()),
        "/describe" => {
            let (id, text) = split(required(rest, "/describe ID [text]")?);
            Command::Describe(id.to_string(), (!text.is_empty()).then(|| text.to_string()))
        }
        "/expire" => {
            let (id, date) = split(required(rest, "/expire ID DATE|none")?);
            let date = match date {
                "none" => None,
                "" => return Err("usage: /expire ID DATE|none".to_string()),
                d => Some(
                    NaiveDate::parse_from_str(d, "%Y-%m-%d")
                        .map_err(|_| format!("`{d}` is not a YYYY-MM-DD date"))?,
                ),
            };
            Command::Expire(id.to_string(), date)
        }
        "/reset" => Command::Reset,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, try /help")),
    };
    Ok(command)
}

pub fn parse_tactical(line: &str) -> Result<TacticalCommand, String> {
    let (head, rest) = split(line);
    let command = match head {
        "/sym" => TacticalCommand::Apply(affordance("sym", rest)?),
        "/suf" => TacticalCommand::Apply(affordance("suf", rest)?),
        "/sub" => TacticalCommand::Apply(affordance("sub", rest)?),
        "/preview" => {
            let (kind, at) = split(rest);
            TacticalCommand::Preview(affordance(kind, at)?)
        }
        "/unpreview" => TacticalCommand::Unpreview,
        "/select" => {
            let (a, b) = split(rest);
            TacticalCommand::Select(index(a)?, index(b)?)
        }
        "/edit" => {
            // Keep inner whitespace as typed.
            let text = line.trim_start().trim_start_matches("/edit");
            TacticalCommand::Edit(text.strip_prefix(' ').unwrap_or(text).to_string())
        }
        "/show" => TacticalCommand::Show,
        "/commit" => TacticalCommand::Commit,
        "/cancel" => TacticalCommand::Cancel,
        "/help" => TacticalCommand::Help,
        other => return Err(format!("unknown tactical command `{other}`, try /help")),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_analyzed_verbatim() {
        assert_eq!(
            parse("correct horse").unwrap(),
            Command::Analyze("correct horse".to_string())
        );
    }

    #[test]
    fn boost_requires_strategy() {
        assert_eq!(parse("/boost auto").unwrap(), Command::BoostAuto);
        assert_eq!(parse("/boost manual").unwrap(), Command::BoostManual);
        assert!(parse("/boost").is_err());
    }

    #[test]
    fn capture_commands_parse_samples() {
        assert_eq!(parse("/voice 1 2, 3").unwrap(), Command::Voice(vec![1, 2, 3]));
        assert_eq!(parse("/voice").unwrap(), Command::Voice(vec![]));
        assert!(parse("/voice 256").is_err());
        assert!(parse("/retina").is_err());
        assert_eq!(parse("/bio").unwrap(), Command::Bio(None));
        assert_eq!(parse("/bio ab12").unwrap(), Command::Bio(Some("ab12".to_string())));
    }

    #[test]
    fn vault_filter_and_ids() {
        assert_eq!(parse("/vault").unwrap(), Command::Vault(None));
        assert_eq!(
            parse("/vault retina").unwrap(),
            Command::Vault(Some(CaptureKind::Retina))
        );
        assert!(parse("/vault smell").is_err());
        assert_eq!(parse("/purge ab12").unwrap(), Command::Purge("ab12".to_string()));
        assert!(parse("/delete").is_err());
    }

    #[test]
    fn describe_and_expire() {
        assert_eq!(
            parse("/describe ab12 work email").unwrap(),
            Command::Describe("ab12".to_string(), Some("work email".to_string()))
        );
        assert_eq!(
            parse("/describe ab12").unwrap(),
            Command::Describe("ab12".to_string(), None)
        );
        assert_eq!(
            parse("/expire ab12 2027-01-31").unwrap(),
            Command::Expire("ab12".to_string(), NaiveDate::from_ymd_opt(2027, 1, 31))
        );
        assert_eq!(
            parse("/expire ab12 none").unwrap(),
            Command::Expire("ab12".to_string(), None)
        );
        assert!(parse("/expire ab12 31/01/2027").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse("/frobnicate").is_err());
    }

    #[test]
    fn tactical_commands() {
        assert_eq!(
            parse_tactical("/suf 1").unwrap(),
            TacticalCommand::Apply(Affordance::Suffix(1))
        );
        assert_eq!(
            parse_tactical("/preview sub 0").unwrap(),
            TacticalCommand::Preview(Affordance::Substitution(0))
        );
        assert_eq!(parse_tactical("/select 2 4").unwrap(), TacticalCommand::Select(2, 4));
        assert_eq!(
            parse_tactical("/edit my  new pass").unwrap(),
            TacticalCommand::Edit("my  new pass".to_string())
        );
        assert!(parse_tactical("/preview xyz 0").is_err());
        assert!(parse_tactical("/sym x").is_err());
    }
}

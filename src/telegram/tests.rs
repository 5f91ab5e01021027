mod handler_tests;
mod test_utils;

use super::*;

#[test]
fn commands_are_parsed() {
    assert_eq!(
        RedirectCommand::parse("/start", "redirect_bot").unwrap(),
        RedirectCommand::Start
    );
    assert_eq!(
        RedirectCommand::parse("/help", "redirect_bot").unwrap(),
        RedirectCommand::Help
    );
    assert!(RedirectCommand::parse("/subscribe", "redirect_bot").is_err());
}

#[test]
fn published_commands_cover_start_and_help() {
    let commands: Vec<_> = RedirectCommand::bot_commands()
        .into_iter()
        .map(|command| command.command.trim_start_matches('/').to_string())
        .collect();

    assert_eq!(commands, vec!["start", "help"]);
}

//! Handlers for adding, removing and listing suggestions.

use crate::gamehop::{Privileged, Session};
use crate::util::numbered;
use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;

pub fn suggest(session: &mut Session, invoker: UserId, game: &str) -> String {
    match session.suggest(game, invoker) {
        Ok(added) => format!(
            "Game suggested! {}, suggested by {}.",
            added.title,
            added.proposer.mention()
        ),
        Err(e) => e.to_string(),
    }
}

pub fn remove(
    session: &mut Session,
    invoker: UserId,
    privileged: &Privileged,
    identifier: &str,
) -> String {
    match session.remove(identifier, invoker, privileged) {
        Ok(removed) => format!(
            "Removed game: {}, which was suggested by {}.",
            removed.title,
            removed.proposer.mention()
        ),
        Err(e) => e.to_string(),
    }
}

pub fn list(session: &Session) -> String {
    if session.suggestions().is_empty() {
        return "No games have been suggested.".to_string();
    }
    let lines = numbered(
        session
            .suggestions()
            .iter()
            .map(|s| format!("{} (suggested by {})", s.title, s.proposer.mention())),
    );
    format!("Current game suggestions:\n{lines}")
}

pub fn suggested_by(session: &Session, identifier: &str) -> String {
    if identifier.trim().is_empty() {
        return "Please provide an index or game name.".to_string();
    }
    match session.queue().lookup(identifier) {
        Some(found) => format!(
            "The game \"{}\" was suggested by {}.",
            found.title,
            found.proposer.mention()
        ),
        None => "No game found with the provided index or name.".to_string(),
    }
}

pub fn suggested_by_user(session: &Session, user: UserId) -> String {
    let games = session.queue().by_proposer(user);
    if games.is_empty() {
        return format!("{} has not suggested any games.", user.mention());
    }
    let titles = numbered(games.iter().map(|s| &s.title));
    format!(
        "Games suggested by {}:\n{titles}\n\nTotal: {} games",
        user.mention(),
        games.len()
    )
}

pub fn remove_games_by_user(
    session: &mut Session,
    invoker: UserId,
    privileged: &Privileged,
    user: UserId,
) -> String {
    let removed = match session.remove_all_by(user, invoker, privileged) {
        Ok(removed) => removed,
        Err(e) => return e.to_string(),
    };
    if removed.is_empty() {
        return format!("{} has not suggested any games.", user.mention());
    }
    let titles = removed
        .iter()
        .map(|s| s.title.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Removed the following games suggested by {}:\n{titles}\n\nTotal: {} games",
        user.mention(),
        removed.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn listing_numbers_entries_with_proposers() {
        let mut s = Session::default();
        assert_eq!(list(&s), "No games have been suggested.");
        suggest(&mut s, uid(1), "Chess");
        suggest(&mut s, uid(2), "Go");
        assert_eq!(
            list(&s),
            "Current game suggestions:\n1. Chess (suggested by <@1>)\n2. Go (suggested by <@2>)"
        );
    }

    #[test]
    fn suggested_by_resolves_index_or_title() {
        let mut s = Session::default();
        suggest(&mut s, uid(1), "Chess");
        assert_eq!(
            suggested_by(&s, "1"),
            "The game \"Chess\" was suggested by <@1>."
        );
        assert_eq!(
            suggested_by(&s, "CHESS"),
            "The game \"Chess\" was suggested by <@1>."
        );
        assert_eq!(
            suggested_by(&s, "2"),
            "No game found with the provided index or name."
        );
        assert_eq!(suggested_by(&s, "   "), "Please provide an index or game name.");
    }

    #[test]
    fn per_user_listing_reports_total() {
        let mut s = Session::default();
        suggest(&mut s, uid(1), "Chess");
        suggest(&mut s, uid(2), "Go");
        suggest(&mut s, uid(1), "Tetris");
        assert_eq!(
            suggested_by_user(&s, uid(1)),
            "Games suggested by <@1>:\n1. Chess\n2. Tetris\n\nTotal: 2 games"
        );
        assert_eq!(suggested_by_user(&s, uid(9)), "<@9> has not suggested any games.");
    }
}

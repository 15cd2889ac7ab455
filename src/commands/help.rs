//! The `/gh help` reply and the subcommand table it shares with registration.

use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Text,
    User,
}

pub struct ArgInfo {
    pub name: &'static str,
    pub kind: ArgKind,
    pub description: &'static str,
}

pub struct SubcommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub arg: Option<ArgInfo>,
    pub privileged: bool,
}

const fn text(name: &'static str, description: &'static str) -> Option<ArgInfo> {
    Some(ArgInfo {
        name,
        kind: ArgKind::Text,
        description,
    })
}

const fn user(description: &'static str) -> Option<ArgInfo> {
    Some(ArgInfo {
        name: "user",
        kind: ArgKind::User,
        description,
    })
}

pub const SUBCOMMANDS: &[SubcommandInfo] = &[
    SubcommandInfo {
        name: "suggest",
        usage: "suggest <game>",
        description: "Suggest a new game",
        arg: text("game", "The game to suggest"),
        privileged: false,
    },
    SubcommandInfo {
        name: "remove",
        usage: "remove <index|game>",
        description: "Delete a game by index or name (must be the one who suggested it)",
        arg: text("identifier", "The index or name of the game to delete"),
        privileged: false,
    },
    SubcommandInfo {
        name: "suggestions",
        usage: "suggestions",
        description: "See what games were suggested",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "suggestedby",
        usage: "suggestedby <index|game>",
        description: "See who suggested a specific game",
        arg: text("identifier", "The index or name of the game"),
        privileged: false,
    },
    SubcommandInfo {
        name: "wheel",
        usage: "wheel",
        description: "Spin the wheel to choose a game",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "wheellastspun",
        usage: "wheellastspun",
        description: "When was the wheel last spun in minutes and seconds",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "removegamesbyuser",
        usage: "removegamesbyuser <user>",
        description: "Remove all games suggested by a specific user",
        arg: user("The user whose games to remove"),
        privileged: false,
    },
    SubcommandInfo {
        name: "suggestedbyuser",
        usage: "suggestedbyuser <user>",
        description: "Retrieve all games suggested by a specific user",
        arg: user("The user whose games to retrieve"),
        privileged: false,
    },
    SubcommandInfo {
        name: "chosengame",
        usage: "chosengame <index|game>",
        description: "Set the chosen game",
        arg: text("game", "The index or name of the game chosen"),
        privileged: true,
    },
    SubcommandInfo {
        name: "currentgame",
        usage: "currentgame",
        description: "Get the current game and how long ago it was chosen",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "veto",
        usage: "veto",
        description: "Veto the current game",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "vetos",
        usage: "vetos",
        description: "See who vetoed the current game and the veto count",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "vetoed",
        usage: "vetoed",
        description: "Mark the current game as vetoed and end it",
        arg: None,
        privileged: true,
    },
    SubcommandInfo {
        name: "gameshistory",
        usage: "gameshistory",
        description: "See the history of chosen games",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "help",
        usage: "help",
        description: "Display the help message",
        arg: None,
        privileged: false,
    },
    SubcommandInfo {
        name: "clear",
        usage: "clear",
        description: "Clear the suggestion queue and games history",
        arg: None,
        privileged: true,
    },
];

/// All registered subcommand names, in help order.
pub fn all_subcommand_names() -> Vec<&'static str> {
    SUBCOMMANDS.iter().map(|c| c.name).collect()
}

pub fn render(invoker: UserId) -> String {
    let lines = SUBCOMMANDS
        .iter()
        .map(|c| {
            let usage = format!("/gh {}", c.usage);
            let note = if c.privileged { " (privileged only)" } else { "" };
            format!("{usage:<29} - {}.{note}", c.description)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Hey {}, welcome to **GameHop**!\n```\n{lines}\n```\nEnjoy your time with GameHop!",
        invoker.mention()
    )
}

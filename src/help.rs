//! Help content shown by `/help`.
//!
//! Two tabs: a reference of every command, and a short general introduction.

use crate::model::Command;
use strum::IntoEnumIterator;

#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub enum HelpTab {
    #[default]
    General,
    Commands,
}

impl HelpTab {
    pub fn title(self) -> &'static str {
        match self {
            HelpTab::General => "General",
            HelpTab::Commands => "Commands",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            HelpTab::General => HelpTab::Commands,
            HelpTab::Commands => HelpTab::General,
        }
    }

    pub fn sections(self) -> Vec<HelpSection> {
        match self {
            HelpTab::General => general_help(),
            HelpTab::Commands => command_help(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HelpItem {
    pub keys: String,
    pub desc: String,
    pub example: String,
}

#[derive(Clone, Debug)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<HelpItem>,
}

fn item(keys: &str, desc: &str, example: &str) -> HelpItem {
    HelpItem {
        keys: keys.to_string(),
        desc: desc.to_string(),
        example: example.to_string(),
    }
}

fn describe(command: Command) -> HelpItem {
    match command {
        Command::AddEvent => item(
            "/addevent 'Title' HH:MM-HH:MM #tag ...",
            "Add a new event with a title, a time range and optional tags.",
            "/addevent 'Meeting' 14:00-15:30 #work #meeting",
        ),
        Command::RemoveEvent => item(
            "/removeevent 'Title'",
            "Remove the first event with this title (asks first).",
            "/removeevent 'Meeting'",
        ),
        Command::RemoveAll => item(
            "/removeall",
            "Remove every event (asks first).",
            "/removeall",
        ),
        Command::EditEvent => item(
            "/editevent 'Title' [HH:MM-HH:MM] [#tag ...]",
            "Change the time range and/or replace the tags of an event.",
            "/editevent 'Meeting' 15:00-16:00",
        ),
        Command::View => item("/view", "Show all events.", "/view"),
        Command::Tagged => item(
            "/tagged #tag ...",
            "Show events carrying any of the given tags.",
            "/tagged #work #home",
        ),
        Command::Search => item(
            "/search 'Keyword'",
            "Reserved for searching events; currently does nothing.",
            "/search 'dentist'",
        ),
        Command::Help => item("/help", "Show this help.", "/help"),
        Command::Exit => item("/exit", "Quit (asks first). Data is saved automatically.", "/exit"),
    }
}

/// One entry per command, in completion order.
pub fn command_help() -> Vec<HelpSection> {
    vec![HelpSection {
        title: "Available commands".to_string(),
        items: Command::iter().map(describe).collect(),
    }]
}

pub fn general_help() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Getting started".to_string(),
            items: vec![
                item(
                    "Input",
                    "Type commands in the input field at the bottom and press Enter.",
                    "/view",
                ),
                item(
                    "Tab",
                    "Complete a partially typed command name.",
                    "/add<Tab> -> /addevent",
                ),
                item(
                    "Order",
                    "After the command name, title, time and tags may come in any order.",
                    "/addevent #chores 12:00-12:30 'Take out the trash'",
                ),
            ],
        },
        HelpSection {
            title: "Syntax".to_string(),
            items: vec![
                item("'Title'", "Event title in single or double quotes.", "'Walk dog'"),
                item("HH:MM-HH:MM", "Start and end time, 24 hour clock.", "07:30-07:45"),
                item("#tag", "Category used by /tagged.", "#pets"),
            ],
        },
    ]
}

mod crawler;

pub use crawler::Game8Crawler;

use itertools::Itertools;
use std::fmt;

pub const CHAINED_QUEST: &str = "Chained Quest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestLink {
    pub name: String,
    pub url: String,
}

/// `count` stays a string: the site mixes numbers with glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEntry {
    pub name: String,
    pub count: String,
}

impl RewardEntry {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, count: C) -> Self {
        RewardEntry {
            name: name.into(),
            count: count.into(),
        }
    }
}

impl fmt::Display for RewardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewards {
    Items(Vec<RewardEntry>),
    /// Placeholder row standing in for a quest whose rewards live on sub-quest pages.
    ChainedQuest,
}

impl Rewards {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Rewards::Items(items) => items.iter().map(ToString::to_string).collect(),
            Rewards::ChainedQuest => vec![CHAINED_QUEST.to_string()],
        }
    }
}

impl fmt::Display for Rewards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().iter().join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRecord {
    pub region: String,
    pub name: String,
    pub rewards: Rewards,
    pub is_sub_quest: bool,
}

impl QuestRecord {
    pub fn quest(region: &str, name: &str, rewards: Vec<RewardEntry>) -> Self {
        QuestRecord {
            region: region.to_string(),
            name: name.to_string(),
            rewards: Rewards::Items(rewards),
            is_sub_quest: false,
        }
    }

    pub fn chained(region: &str, name: &str) -> Self {
        QuestRecord {
            region: region.to_string(),
            name: name.to_string(),
            rewards: Rewards::ChainedQuest,
            is_sub_quest: false,
        }
    }

    pub fn sub_quest(name: &str, rewards: Vec<RewardEntry>) -> Self {
        QuestRecord {
            region: String::new(),
            name: name.to_string(),
            rewards: Rewards::Items(rewards),
            is_sub_quest: true,
        }
    }
}

impl fmt::Display for QuestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sub_quest {
            writeln!(f, "Sub-quest       : {}", self.name)?;
        } else {
            writeln!(f, "Region          : {}", self.region)?;
            writeln!(f, "Quest Name      : {}", self.name)?;
        }
        writeln!(f, "Rewards         : ")?;
        for line in self.rewards.lines() {
            writeln!(f, "> {}", line)?;
        }
        Ok(())
    }
}

/// One region table of the archive page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub quests: Vec<QuestLink>,
}

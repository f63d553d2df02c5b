//! Custom emoji and alias resolution

use std::collections::HashMap;
use std::fmt;

use super::Record;
use crate::error::{Error, Result};

const ALIAS_PREFIX: &str = "alias:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiKind {
    Image,
    Alias,
}

impl EmojiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiKind::Image => "image",
            EmojiKind::Alias => "alias",
        }
    }
}

/// A custom emoji with its image resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Emoji {
    pub name: String,
    /// Raw value from `emoji.list`: a URL or `alias:<name>`
    pub image: String,
    pub kind: EmojiKind,
    /// `None` when an alias points at an unknown emoji
    pub image_url: Option<String>,
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Emoji(name={}, type={})>", self.name, self.kind.as_str())
    }
}

/// The `emoji.list` name-to-image map. Aliases resolve on lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Emojies {
    names: Vec<String>,
    images: HashMap<String, String>,
}

impl Emojies {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut names = Vec::new();
        let mut images = HashMap::new();
        for (name, image) in entries {
            let name = name.into();
            if images.insert(name.clone(), image.into()).is_none() {
                names.push(name);
            }
        }
        Self { names, images }
    }

    pub(crate) fn from_record(record: &Record) -> Result<Self> {
        let entries = record
            .as_map()
            .iter()
            .map(|(name, image)| {
                image
                    .as_str()
                    .map(|image| (name.clone(), image.to_string()))
                    .ok_or_else(|| Error::missing(format!("emoji.{}", name)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    pub fn get(&self, name: &str) -> Result<Emoji> {
        self.resolve(name, &mut Vec::new())
            .ok_or_else(|| Error::not_found("emoji", name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Names in response order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = Emoji> + '_ {
        self.names
            .iter()
            .filter_map(|name| self.resolve(name, &mut Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // `seen` holds the alias chain so far; a cycle resolves to no URL.
    fn resolve<'a>(&'a self, name: &'a str, seen: &mut Vec<&'a str>) -> Option<Emoji> {
        let image = self.images.get(name)?;
        let (kind, image_url) = match image.strip_prefix(ALIAS_PREFIX) {
            None => (EmojiKind::Image, Some(image.clone())),
            Some(target) => {
                seen.push(name);
                let url = if seen.contains(&target) {
                    None
                } else {
                    self.resolve(target, seen).and_then(|e| e.image_url)
                };
                (EmojiKind::Alias, url)
            }
        };
        Some(Emoji {
            name: name.to_string(),
            image: image.clone(),
            kind,
            image_url,
        })
    }
}

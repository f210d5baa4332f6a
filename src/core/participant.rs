//! Participant identities and per-participant storage.
//!
//! ## ParticipantId
//!
//! Dense 0-based index into the [`Roster`]. The roster order is the
//! initial seating order, which in turn is the alive-list order used for
//! descriptions and ballot numbering.
//!
//! ## ParticipantMap
//!
//! `Vec`-backed per-participant data indexable by `ParticipantId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier supporting 1-255 participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all participant IDs for a roster of `count` entries.
    ///
    /// ```
    /// use undercover::core::ParticipantId;
    ///
    /// let ids: Vec<_> = ParticipantId::all(4).collect();
    /// assert_eq!(ids.len(), 4);
    /// assert_eq!(ids[3], ParticipantId::new(3));
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// A seat at the table: the responder address plus a display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Roster position.
    pub id: ParticipantId,

    /// Stable key handed to the responder (e.g. a bot handle).
    pub key: String,

    /// Human-readable name used in ballots and reports.
    pub name: String,
}

impl Participant {
    pub fn new(id: ParticipantId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Fixed, ordered list of participants.
///
/// Serialized as a plain list of `{key, name}` entries; ids are assigned
/// from position on load so they can never disagree with the order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant; its id is its position.
    ///
    /// Panics past 255 entries, the `ParticipantId` range.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.push(key, name);
        self
    }

    /// Append a participant in place and return its id.
    pub fn push(&mut self, key: impl Into<String>, name: impl Into<String>) -> ParticipantId {
        assert!(self.participants.len() < 255, "At most 255 participants supported");
        let id = ParticipantId(self.participants.len() as u8);
        self.participants.push(Participant::new(id, key, name));
        id
    }

    /// The four-agent table the game ships with.
    #[must_use]
    pub fn default_agents() -> Self {
        (1..=4).fold(Self::new(), |roster, n| {
            roster.with(format!("agent{n}"), format!("Undercover {n}"))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    /// Look a participant up by its responder key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }
}

impl Index<ParticipantId> for Roster {
    type Output = Participant;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        &self.participants[id.index()]
    }
}

#[derive(Serialize, Deserialize)]
struct RosterEntry {
    key: String,
    name: String,
}

impl Serialize for Roster {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.participants.len()))?;
        for p in &self.participants {
            seq.serialize_element(&RosterEntry {
                key: p.key.clone(),
                name: p.name.clone(),
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<RosterEntry>::deserialize(deserializer)?;
        if entries.len() > 255 {
            return Err(serde::de::Error::custom("at most 255 participants supported"));
        }
        Ok(entries
            .into_iter()
            .fold(Roster::new(), |roster, e| roster.with(e.key, e.name)))
    }
}

/// Per-participant data storage with O(1) access.
///
/// ```
/// use undercover::core::{ParticipantId, ParticipantMap};
///
/// let mut words: ParticipantMap<&str> = ParticipantMap::with_value(3, "apple");
/// words[ParticipantId::new(2)] = "pear";
/// assert_eq!(words[ParticipantId::new(0)], "apple");
/// assert_eq!(words[ParticipantId::new(2)], "pear");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantMap<T> {
    data: Vec<T>,
}

impl<T> ParticipantMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(count: usize, factory: impl Fn(ParticipantId) -> T) -> Self {
        assert!(count > 0, "Must have at least 1 participant");
        assert!(count <= 255, "At most 255 participants supported");

        let data = ParticipantId::all(count).map(factory).collect();
        Self { data }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(count, |_| value.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&T> {
        self.data.get(id.index())
    }

    /// Iterate over (ParticipantId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }
}

impl<T> Index<ParticipantId> for ParticipantMap<T> {
    type Output = T;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        &self.data[id.index()]
    }
}

impl<T> IndexMut<ParticipantId> for ParticipantMap<T> {
    fn index_mut(&mut self, id: ParticipantId) -> &mut Self::Output {
        &mut self.data[id.index()]
    }
}

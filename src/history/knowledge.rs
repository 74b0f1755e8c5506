//! British history knowledge table
//!
//! A fixed, ordered table of people and events. It lives in a `static` and is never
//! mutated, so it needs no initialisation step or locking. Table order is the
//! tie-break when more than one entry matches a question: earlier entries win.

use serde::{Serialize, Serializer};

/// A single fact slot an answer can be drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fact {
    Who,
    What,
    WhenBorn,
    WhenDied,
    WhereBorn,
    FamousFor,
    When,
    Where,
    WhoWon,
    WhoLost,
    Significance,
}

/// Facts about a historical figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFacts {
    pub who: &'static str,
    pub what: &'static str,
    pub when_born: &'static str,
    pub when_died: &'static str,
    pub where_born: &'static str,
    pub famous_for: &'static str,
    pub achievements: &'static [&'static str],
}

/// Facts about a battle or event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFacts {
    pub what: &'static str,
    pub when: &'static str,
    #[serde(rename = "where")]
    pub place: &'static str,
    pub who_won: Option<&'static str>,
    pub who_lost: Option<&'static str>,
    pub significance: Option<&'static str>,
    /// Entry-specific extras (cause, commander, ...)
    #[serde(serialize_with = "serialize_notes", skip_serializing_if = "<[_]>::is_empty")]
    pub notes: &'static [(&'static str, &'static str)],
}

fn serialize_notes<S: Serializer>(
    notes: &&'static [(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(notes.iter().copied())
}

/// The full record behind an answer; returned alongside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Facts {
    Person(PersonFacts),
    Event(EventFacts),
}

impl Facts {
    /// Look up one fact slot; `None` when this kind of record has no such slot.
    pub fn get(&self, fact: Fact) -> Option<&'static str> {
        match self {
            Facts::Person(p) => match fact {
                Fact::Who => Some(p.who),
                Fact::What => Some(p.what),
                Fact::WhenBorn => Some(p.when_born),
                Fact::WhenDied => Some(p.when_died),
                Fact::WhereBorn => Some(p.where_born),
                Fact::FamousFor => Some(p.famous_for),
                _ => None,
            },
            Facts::Event(e) => match fact {
                Fact::What => Some(e.what),
                Fact::When => Some(e.when),
                Fact::Where => Some(e.place),
                Fact::WhoWon => e.who_won,
                Fact::WhoLost => e.who_lost,
                Fact::Significance => e.significance,
                _ => None,
            },
        }
    }
}

/// A table row: canonical lowercase key, alternative names, and facts.
///
/// `aliases` is a list of keyword groups. A group matches when every keyword in it
/// appears in the question; any matching group is enough.
#[derive(Debug)]
pub struct KnowledgeEntry {
    pub key: &'static str,
    pub aliases: &'static [&'static [&'static str]],
    pub facts: Facts,
}

impl KnowledgeEntry {
    /// Match against an already lowercased question
    pub fn matches(&self, question: &str) -> bool {
        question.contains(self.key)
            || self
                .aliases
                .iter()
                .any(|group| group.iter().all(|word| question.contains(word)))
    }

    pub fn is_person(&self) -> bool {
        matches!(self.facts, Facts::Person(_))
    }
}

static KNOWLEDGE_BASE: &[KnowledgeEntry] = &[
    // Historical figures
    KnowledgeEntry {
        key: "winston churchill",
        aliases: &[&["churchill"]],
        facts: Facts::Person(PersonFacts {
            who: "Winston Churchill",
            what: "British Prime Minister during World War II",
            when_born: "30 November 1874",
            when_died: "24 January 1965",
            where_born: "Blenheim Palace, Oxfordshire",
            famous_for: "Leading Britain during World War II",
            achievements: &["World War II leadership", "Nobel Prize in Literature", "Iron Curtain speech"],
        }),
    },
    KnowledgeEntry {
        key: "margaret thatcher",
        aliases: &[&["thatcher"], &["iron lady"]],
        facts: Facts::Person(PersonFacts {
            who: "Margaret Thatcher",
            what: "British Prime Minister (1979-1990)",
            when_born: "13 October 1925",
            when_died: "8 April 2013",
            where_born: "Grantham, Lincolnshire",
            famous_for: "First female British Prime Minister, known as the Iron Lady",
            achievements: &["Falklands War victory", "Economic reforms", "Cold War diplomacy"],
        }),
    },
    KnowledgeEntry {
        key: "elizabeth i",
        aliases: &[&["elizabeth"], &["virgin queen"]],
        facts: Facts::Person(PersonFacts {
            who: "Elizabeth I",
            what: "Queen of England (1558-1603)",
            when_born: "7 September 1533",
            when_died: "24 March 1603",
            where_born: "Greenwich Palace",
            famous_for: "The Virgin Queen, Elizabethan Golden Age",
            achievements: &["Defeated Spanish Armada", "Elizabethan Renaissance", "Never married"],
        }),
    },
    KnowledgeEntry {
        key: "henry viii",
        aliases: &[&["henry", "viii"], &["henry", "8th"], &["henry", "six wives"]],
        facts: Facts::Person(PersonFacts {
            who: "Henry VIII",
            what: "King of England (1509-1547)",
            when_born: "28 June 1491",
            when_died: "28 January 1547",
            where_born: "Greenwich Palace",
            famous_for: "Having six wives and breaking with Rome",
            achievements: &["Founded Church of England", "Dissolved monasteries", "Six marriages"],
        }),
    },
    KnowledgeEntry {
        key: "charles darwin",
        aliases: &[&["darwin"], &["evolution"]],
        facts: Facts::Person(PersonFacts {
            who: "Charles Darwin",
            what: "British naturalist and biologist",
            when_born: "12 February 1809",
            when_died: "19 April 1882",
            where_born: "Shrewsbury, Shropshire",
            famous_for: "Theory of evolution by natural selection",
            achievements: &["On the Origin of Species", "Theory of Evolution", "Voyage of the Beagle"],
        }),
    },
    KnowledgeEntry {
        key: "william shakespeare",
        aliases: &[&["shakespeare"], &["playwright"]],
        facts: Facts::Person(PersonFacts {
            who: "William Shakespeare",
            what: "English playwright and poet",
            when_born: "26 April 1564",
            when_died: "23 April 1616",
            where_born: "Stratford-upon-Avon",
            famous_for: "Greatest writer in the English language",
            achievements: &["Hamlet", "Romeo and Juliet", "Macbeth", "39 plays, 154 sonnets"],
        }),
    },
    KnowledgeEntry {
        key: "isaac newton",
        aliases: &[&["newton"]],
        facts: Facts::Person(PersonFacts {
            who: "Isaac Newton",
            what: "English mathematician and physicist",
            when_born: "25 December 1642",
            when_died: "20 March 1727",
            where_born: "Woolsthorpe, Lincolnshire",
            famous_for: "Laws of motion and universal gravitation",
            achievements: &["Principia Mathematica", "Laws of Motion", "Calculus", "Optics"],
        }),
    },
    KnowledgeEntry {
        key: "captain cook",
        aliases: &[&["cook", "captain"], &["cook", "explorer"]],
        facts: Facts::Person(PersonFacts {
            who: "Captain James Cook",
            what: "British explorer and navigator",
            when_born: "7 November 1728",
            when_died: "14 February 1779",
            where_born: "Marton, Yorkshire",
            famous_for: "Exploring the Pacific Ocean and mapping Australia",
            achievements: &["Three Pacific voyages", "Mapped Australia", "Discovered Hawaii"],
        }),
    },
    // Battles and events
    KnowledgeEntry {
        key: "battle of waterloo",
        aliases: &[],
        facts: Facts::Event(EventFacts {
            what: "Battle of Waterloo",
            when: "18 June 1815",
            place: "Waterloo, Belgium",
            who_won: Some("Duke of Wellington"),
            who_lost: Some("Napoleon Bonaparte"),
            significance: Some("Final defeat of Napoleon"),
            notes: &[],
        }),
    },
    KnowledgeEntry {
        key: "battle of hastings",
        aliases: &[],
        facts: Facts::Event(EventFacts {
            what: "Battle of Hastings",
            when: "14 October 1066",
            place: "Hastings, East Sussex",
            who_won: Some("William the Conqueror"),
            who_lost: Some("King Harold II"),
            significance: Some("Norman Conquest of England"),
            notes: &[],
        }),
    },
    KnowledgeEntry {
        key: "great fire of london",
        aliases: &[],
        facts: Facts::Event(EventFacts {
            what: "Great Fire of London",
            when: "2-6 September 1666",
            place: "City of London",
            who_won: None,
            who_lost: None,
            significance: None,
            notes: &[
                ("started", "Pudding Lane"),
                ("cause", "Bakery fire"),
                ("result", "Rebuilt by Christopher Wren"),
            ],
        }),
    },
    KnowledgeEntry {
        key: "spanish armada",
        aliases: &[],
        facts: Facts::Event(EventFacts {
            what: "Spanish Armada",
            when: "1588",
            place: "English Channel",
            who_won: Some("England"),
            who_lost: None,
            significance: Some("Established English naval supremacy"),
            notes: &[("commander", "Francis Drake")],
        }),
    },
];

/// The whole table, in match-precedence order
pub fn knowledge_base() -> &'static [KnowledgeEntry] {
    KNOWLEDGE_BASE
}

/// First entry matching the lowercased question, in table order
pub fn find_entry(question: &str) -> Option<&'static KnowledgeEntry> {
    KNOWLEDGE_BASE.iter().find(|entry| entry.matches(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_is_stable() {
        let keys: Vec<&str> = knowledge_base().iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![
                "winston churchill",
                "margaret thatcher",
                "elizabeth i",
                "henry viii",
                "charles darwin",
                "william shakespeare",
                "isaac newton",
                "captain cook",
                "battle of waterloo",
                "battle of hastings",
                "great fire of london",
                "spanish armada",
            ]
        );
    }

    #[test]
    fn test_keys_are_lowercase() {
        for entry in knowledge_base() {
            assert_eq!(entry.key, entry.key.to_lowercase());
            for group in entry.aliases {
                for word in *group {
                    assert_eq!(*word, word.to_lowercase());
                }
            }
        }
    }

    #[test]
    fn test_alias_groups_need_every_word() {
        assert_eq!(find_entry("who was the iron lady?").unwrap().key, "margaret thatcher");
        assert_eq!(find_entry("when was henry the 8th born?").unwrap().key, "henry viii");
        // "henry" alone is not enough
        assert!(find_entry("who was henry?").is_none());
        // "cook" needs "captain" or "explorer"
        assert!(find_entry("who was the cook?").is_none());
        assert_eq!(find_entry("which explorer was cook?").unwrap().key, "captain cook");
    }

    #[test]
    fn test_first_match_wins() {
        // Mentions both Elizabeth and the Armada; Elizabeth is earlier in the table
        let entry = find_entry("did elizabeth defeat the spanish armada?").unwrap();
        assert_eq!(entry.key, "elizabeth i");
    }

    #[test]
    fn test_facts_serialize_with_extras() {
        let churchill = serde_json::to_value(&find_entry("churchill").unwrap().facts).unwrap();
        assert_eq!(churchill["kind"], "person");
        assert_eq!(churchill["whenBorn"], "30 November 1874");
        assert_eq!(churchill["achievements"][1], "Nobel Prize in Literature");

        let waterloo = serde_json::to_value(&find_entry("battle of waterloo").unwrap().facts).unwrap();
        assert_eq!(waterloo["kind"], "event");
        assert_eq!(waterloo["where"], "Waterloo, Belgium");
        assert_eq!(waterloo["whoLost"], "Napoleon Bonaparte");
        assert_eq!(waterloo["significance"], "Final defeat of Napoleon");
        assert!(waterloo.get("notes").is_none());

        let armada = serde_json::to_value(&find_entry("spanish armada").unwrap().facts).unwrap();
        assert_eq!(armada["notes"]["commander"], "Francis Drake");
    }

    #[test]
    fn test_event_facts_have_no_person_slots() {
        let waterloo = find_entry("battle of waterloo").unwrap();
        assert!(!waterloo.is_person());
        assert_eq!(waterloo.facts.get(Fact::Who), None);
        assert_eq!(waterloo.facts.get(Fact::WhoWon), Some("Duke of Wellington"));
        assert_eq!(waterloo.facts.get(Fact::WhenBorn), None);
    }
}

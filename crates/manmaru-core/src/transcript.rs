//! Pure transcript operations.
//!
//! A transcript is an ordered `Vec<Turn>`, oldest first. Nothing here does
//! I/O; every function takes a transcript and returns a new one, so the
//! window invariant can be checked in isolation.

use manmaru_types::persona::Persona;
use manmaru_types::turn::Turn;

/// A fresh transcript holding only the persona's system turn.
pub fn seed(persona: Persona) -> Vec<Turn> {
    vec![Turn::system(persona.prompt())]
}

/// Copy of `transcript` with `turn` appended.
pub fn with_turn(transcript: &[Turn], turn: Turn) -> Vec<Turn> {
    let mut next = Vec::with_capacity(transcript.len() + 1);
    next.extend_from_slice(transcript);
    next.push(turn);
    next
}

/// Keep the most recent `cap` turns in their original order.
///
/// Oldest turns are dropped first, including a leading system turn once the
/// window slides past it.
pub fn truncate(transcript: Vec<Turn>, cap: usize) -> Vec<Turn> {
    if transcript.len() <= cap {
        return transcript;
    }
    let drop = transcript.len() - cap;
    transcript.into_iter().skip(drop).collect()
}

//! Motivational quote rotation shown in the header.

use rand::Rng;

pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "Success is the sum of small efforts, repeated day in and day out.",
    "The pain you feel today will be the strength you feel tomorrow.",
    "There are no shortcuts to any place worth going.",
    "JEE is not just an exam, it's a journey of self-discipline.",
    "Don't stop when you're tired. Stop when you're done.",
    "Your only limit is you.",
    "Work hard in silence, let your success be your noise.",
    "Consistency is the key to cracking JEE.",
    "Dream big. Work hard. Stay focused.",
    "It always seems impossible until it's done.",
    "Believe you can and you're halfway there.",
    "Focus on the process, not just the result.",
    "Every problem you solve is a step closer to your dream college.",
    "Discipline is doing what needs to be done, even if you don't want to do it.",
    "Fall seven times, stand up eight.",
    "The future belongs to those who prepare for it today.",
];

/// Picks a uniformly random quote.
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES[rng.random_range(0..MOTIVATIONAL_QUOTES.len())]
}

/// Picks a random quote different from `current`.
///
/// Quotes are distinct, so the loop terminates with probability one.
pub fn next_quote<R: Rng + ?Sized>(current: &str, rng: &mut R) -> &'static str {
    loop {
        let candidate = random_quote(rng);
        if candidate != current {
            return candidate;
        }
    }
}

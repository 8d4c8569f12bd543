//! Response selection.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{IntentError, Result};

use super::repository::IntentRepository;

/// Pick one of `tag`'s responses uniformly at random.
///
/// The random source is supplied by the caller; a seeded generator makes the
/// choice reproducible.
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use intentbot::ml::intent_classifier::{IntentRepository, select_response};
///
/// let repository = IntentRepository::load(
///     r#"[{"tag": "thanks", "patterns": ["thanks"], "responses": ["Any time!", "My pleasure"]}]"#,
/// ).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let response = select_response("thanks", &repository, &mut rng).unwrap();
/// assert!(response == "Any time!" || response == "My pleasure");
/// ```
pub fn select_response<'a, R>(
    tag: &str,
    repository: &'a IntentRepository,
    rng: &mut R,
) -> Result<&'a str>
where
    R: Rng + ?Sized,
{
    repository
        .responses_for(tag)?
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| IntentError::malformed(format!("intent '{tag}' has no responses")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn repository() -> IntentRepository {
        IntentRepository::load(
            r#"[
                {"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!", "Hi there!", "Hey!"]},
                {"tag": "farewell", "patterns": ["bye"], "responses": ["Goodbye!"]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_selected_response_belongs_to_tag() {
        let repository = repository();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let response = select_response("greeting", &repository, &mut rng).unwrap();
            assert!(
                repository
                    .responses_for("greeting")
                    .unwrap()
                    .iter()
                    .any(|r| r == response)
            );
        }
        assert_eq!(
            select_response("farewell", &repository, &mut rng).unwrap(),
            "Goodbye!"
        );
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let repository = repository();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                select_response("greeting", &repository, &mut a).unwrap(),
                select_response("greeting", &repository, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_all_responses_are_reachable() {
        let repository = repository();
        let mut rng = StdRng::seed_from_u64(3);

        let seen: HashSet<&str> = (0..200)
            .map(|_| select_response("greeting", &repository, &mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_unknown_tag() {
        let repository = repository();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            select_response("weather", &repository, &mut rng),
            Err(IntentError::UnknownTag(_))
        ));
    }
}

use crate::models::question::Question;

/// The ten behaviour questions served by the reference prediction service,
/// with the field names its model was trained on.
pub fn behaviour_questions() -> Vec<Question> {
    let items = [
        ("eye_contact", "Does the child make eye contact?"),
        ("responds_name", "Does the child respond to their name?"),
        ("points_to_objects", "Does the child point to objects of interest?"),
        ("pretend_play", "Does the child engage in pretend play?"),
        ("repetitive_behaviour", "Does the child show repetitive behaviors?"),
        (
            "sensory_sensitivity",
            "Is the child sensitive to certain sounds or textures?",
        ),
        ("prefers_alone", "Does the child prefer to play alone?"),
        ("gestures", "Does the child use gestures while communicating?"),
        ("delayed_speech", "Is there any delay in speech development?"),
        (
            "restricted_interests",
            "Does the child show restricted or fixed interests?",
        ),
    ];

    items
        .iter()
        .zip(1..)
        .map(|((field, text), id)| Question::new(id, *text, *field))
        .collect()
}

//! Built-in topic catalog for the Open Trivia DB
//!
//! Category ids follow the provider's fixed numbering. Science and
//! Entertainment span several provider categories and are played
//! adaptively; the rest map to a single category.

use quizcord_domain::{CategoryId, Topic};

/// The topics offered for voting
pub fn builtin_catalog() -> Vec<Topic> {
    vec![
        Topic::flat("General Knowledge", CategoryId(9)),
        Topic::branching(
            "Science",
            vec![CategoryId(17), CategoryId(18), CategoryId(19)],
        ),
        Topic::branching(
            "Entertainment",
            vec![
                CategoryId(11),
                CategoryId(12),
                CategoryId(14),
                CategoryId(15),
            ],
        ),
        Topic::flat("Mythology", CategoryId(20)),
        Topic::flat("Sports", CategoryId(21)),
        Topic::flat("Geography", CategoryId(22)),
        Topic::flat("History", CategoryId(23)),
        Topic::flat("Animals", CategoryId(27)),
    ]
}

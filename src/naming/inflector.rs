//! English pluralization and singularization.
//!
//! Rules are applied to the last `_`-separated word only, so `blog_post` becomes
//! `blog_posts` and `sales_person` becomes `sales_people`. A leading capital on that
//! word is carried over to the result.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inflection capability used by the convention resolver
pub trait Inflector {
    /// Plural form of `word`
    fn pluralize(&self, word: &str) -> String;
    /// Singular form of `word`
    fn singularize(&self, word: &str) -> String;
}

/// Default English inflector: uncountables, irregular nouns, then suffix rules
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "hardware",
    "information",
    "jeans",
    "knowledge",
    "metadata",
    "money",
    "moose",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "traffic",
];

// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("brownie", "brownies"),
    ("cactus", "cacti"),
    ("calorie", "calories"),
    ("child", "children"),
    ("cookie", "cookies"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("genie", "genies"),
    ("goose", "geese"),
    ("hoodie", "hoodies"),
    ("man", "men"),
    ("mouse", "mice"),
    ("move", "moves"),
    ("movie", "movies"),
    ("ox", "oxen"),
    ("person", "people"),
    ("pie", "pies"),
    ("prairie", "prairies"),
    ("rookie", "rookies"),
    ("selfie", "selfies"),
    ("smoothie", "smoothies"),
    ("tie", "ties"),
    ("tooth", "teeth"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn compile(rules: &[(&str, &'static str)]) -> Vec<Rule> {
    rules
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("inflection rule should be a valid regex"),
            replacement,
        })
        .collect()
}

// First match wins, most specific first.
static PLURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        (r"(quiz)$", "${1}zes"),
        (r"(matr|vert|ind)(ix|ex)$", "${1}ices"),
        (r"(octop|vir)us$", "${1}i"),
        (r"(alias|status|bus|campus)$", "${1}es"),
        (r"(buffal|tomat|potat|her|ech)o$", "${1}oes"),
        (r"(^ax|test)is$", "${1}es"),
        (r"sis$", "ses"),
        (r"(x|ch|ss|sh|zz)$", "${1}es"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"(hive)$", "${1}s"),
        // Closed lists: any other -f/-fe noun (`chef`, `cafe`, `safe`) takes a plain -s
        (r"(^wol|^hal|^cal|^el|^lea|^loa|^thie|^shea|^scar|^dwar|^whar|shel|sel)f$", "${1}ves"),
        (r"^(wi|kni|li)fe$", "${1}ves"),
        (r"s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        (r"(quiz)zes$", "${1}"),
        (r"(matr)ices$", "${1}ix"),
        (r"(vert|ind)ices$", "${1}ex"),
        (r"(octop|vir)i$", "${1}us"),
        (r"(alias|status|bus|campus)es$", "${1}"),
        (r"(buffal|tomat|potat|her|ech)oes$", "${1}o"),
        (r"(analy|ba|diagno|parenthe|progno|synop|the)ses$", "${1}sis"),
        (r"(^ax|test)es$", "${1}is"),
        (r"(x|ch|ss|sh|zz)es$", "${1}"),
        (r"([^aeiouy]|qu)ies$", "${1}y"),
        (r"(hive)s$", "${1}"),
        (r"(^wol|^hal|^cal|^el|^lea|^loa|^thie|^shea|^scar|^dwar|^whar|shel|sel)ves$", "${1}f"),
        (r"^(wi|kni|li)ves$", "${1}fe"),
        (r"ss$", "ss"),
        (r"us$", "us"),
        (r"s$", ""),
    ])
});

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        inflect_last_word(word, |w| {
            if let Some((_, plural)) = IRREGULAR.iter().find(|(s, p)| *s == w || *p == w) {
                return (*plural).to_string();
            }
            apply_rules(&PLURAL_RULES, w)
        })
    }

    fn singularize(&self, word: &str) -> String {
        inflect_last_word(word, |w| {
            if let Some((singular, _)) = IRREGULAR.iter().find(|(s, p)| *p == w || *s == w) {
                return (*singular).to_string();
            }
            apply_rules(&SINGULAR_RULES, w)
        })
    }
}

fn apply_rules(rules: &[Rule], word: &str) -> String {
    for rule in rules {
        if rule.pattern.is_match(word) {
            return rule.pattern.replace(word, rule.replacement).into_owned();
        }
    }
    word.to_string()
}

/// Split off the last `_` word, inflect its lowercase form, restore capitalization.
fn inflect_last_word(word: &str, inflect: impl Fn(&str) -> String) -> String {
    let (head, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };
    if last.is_empty() {
        return word.to_string();
    }
    let lower = last.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    let inflected = inflect(&lower);
    let capitalized = last.chars().next().is_some_and(char::is_uppercase);
    format!("{head}{}", if capitalized { capitalize(&inflected) } else { inflected })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

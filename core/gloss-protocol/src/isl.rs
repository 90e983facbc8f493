//! Built-in Indian Sign Language lexicon matching the bundled motion dataset.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::category::SemanticCategory;
use crate::ids::GlossId;
use crate::model::{
    AliasGroup, CategoryKeywords, Gloss, LemmaOverride, Lexicon, SuffixRule, Transliteration,
};

/// (canonical text, clip file base name)
const GLOSSES: &[(&str, &str)] = &[
    ("alright", "Alright"),
    ("beautiful", "Beautiful"),
    ("bed", "Bed"),
    ("bedroom", "Bedroom"),
    ("blind", "Blind"),
    ("cell phone", "Cell phone"),
    ("chair", "Chair"),
    ("clock", "Clock"),
    ("computer", "Computer"),
    ("deaf", "Deaf"),
    ("door", "Door"),
    ("dream", "Dream"),
    ("dress", "Dress"),
    ("fan", "Fan"),
    ("friday", "Friday"),
    ("good afternoon", "Good afternoon"),
    ("good morning", "Good Morning"),
    ("happy", "happy"),
    ("hat", "Hat"),
    ("hello", "Hello"),
    ("how are you", "How are you"),
    ("lamp", "Lamp"),
    ("loud", "loud"),
    ("monday", "Monday"),
    ("quiet", "quiet"),
    ("sad", "sad"),
    ("saturday", "Saturday"),
    ("shirt", "Shirt"),
    ("skirt", "Skirt"),
    ("suit", "Suit"),
    ("sunday", "Sunday"),
    ("table", "Table"),
    ("thursday", "Thursday"),
    ("today", "Today"),
    ("tuesday", "Tuesday"),
    ("ugly", "Ugly"),
    ("wednesday", "Wednesday"),
    ("window", "Window"),
];

const ALIASES: &[(&str, &[&str])] = &[
    ("alright", &["okay", "ok", "fine"]),
    ("beautiful", &["pretty", "gorgeous", "lovely"]),
    ("bed", &["bunk", "cot"]),
    ("bedroom", &["bed room", "room", "sleeping room"]),
    ("blind", &["visionless", "sightless", "visually impaired", "vision impaired"]),
    ("cell phone", &["mobile phone", "mobile", "phone", "smartphone", "cellphone"]),
    ("chair", &["seat", "stool", "armchair"]),
    ("clock", &["watch", "timepiece"]),
    ("computer", &["pc", "laptop", "desktop", "computer system"]),
    ("deaf", &["hearing impaired", "hard of hearing"]),
    ("door", &["gate", "entryway"]),
    ("dream", &["vision", "fantasy", "imagine"]),
    ("dress", &["gown", "frock"]),
    ("fan", &["cooler", "blower", "ceiling fan"]),
    ("friday", &["fri"]),
    ("good afternoon", &["afternoon greeting", "good noon"]),
    ("good morning", &["morning greeting", "gm", "good day"]),
    ("happy", &["glad", "joyful", "cheerful", "pleased"]),
    ("hat", &["cap", "beanie"]),
    ("hello", &["hi", "hey", "greetings"]),
    ("how are you", &["how r u", "how are ya", "how you doing"]),
    ("lamp", &["light", "lantern"]),
    ("loud", &["noisy", "booming"]),
    ("monday", &["mon"]),
    ("quiet", &["silent", "hushed", "calm"]),
    ("sad", &["unhappy", "upset", "sorrowful"]),
    ("saturday", &["sat"]),
    ("shirt", &["top", "tshirt", "t-shirt", "tee"]),
    ("skirt", &["mini", "skirts", "pleated skirt"]),
    ("suit", &["blazer", "tuxedo", "coat and pants"]),
    ("sunday", &["sun"]),
    ("table", &["desk", "dining table"]),
    ("thursday", &["thu"]),
    ("today", &["present day", "nowadays"]),
    ("tuesday", &["tue"]),
    ("ugly", &["unattractive", "plain"]),
    ("wednesday", &["wed"]),
    ("window", &["pane", "glass window"]),
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "am", "are", "was", "were", "be", "been",
    "will", "would", "can", "could", "should", "shall", "may", "might",
    "to", "at", "in", "on", "of", "for", "with", "from", "by", "about",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her",
    "us", "them", "my", "your", "our", "their", "mine", "yours", "ours", "theirs", "its",
];

const TIME_WORDS: &[&str] = &[
    "today", "tomorrow", "yesterday", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday",
];

const LEMMA_OVERRIDES: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("happier", "happy"),
    ("happiest", "happy"),
    ("sadder", "sad"),
    ("saddest", "sad"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("phones", "phone"),
    ("cellphones", "cellphone"),
];

const CATEGORY_KEYWORDS: &[(SemanticCategory, &[&str])] = &[
    (SemanticCategory::Greeting, &["hello", "hi", "hey", "good morning", "good afternoon", "how are you"]),
    (SemanticCategory::Time, &[
        "today", "tomorrow", "yesterday", "monday", "tuesday", "wednesday",
        "thursday", "friday", "saturday", "sunday",
    ]),
    (SemanticCategory::Clothing, &["hat", "dress", "shirt", "skirt", "suit"]),
    (SemanticCategory::Furniture, &["bed", "bedroom", "chair", "table"]),
    (SemanticCategory::Device, &["computer", "cell", "phone", "fan", "lamp"]),
    (SemanticCategory::FeelingPositive, &["happy", "alright", "beautiful", "good"]),
    (SemanticCategory::FeelingNegative, &["sad", "ugly", "loud", "quiet"]),
    (SemanticCategory::Household, &["door", "window", "lamp"]),
    (SemanticCategory::Accessibility, &["blind", "deaf"]),
    (SemanticCategory::Imagination, &["dream"]),
];

/// Known Hindi demo sentences and their English keyword rewrites.
const TRANSLITERATIONS: &[(&str, &str)] = &[
    ("आज सोमवार को मैं मोबाइल और कंप्यूटर देख रहा हूँ।", "Monday mobile computer"),
    ("सुबह बेडरूम में घड़ी और लैम्प चालू थे।", "bedroom clock lamp"),
    ("मेज़ पर पेन, किताब और अख़बार पड़े हैं।", "pen book newspaper"),
    ("मैंने आज कमीज़ और सूट पहना है।", "shirt suit"),
    ("रसोई में पंखा और लैम्प चालू है।", "kitchen fan lamp"),
    ("यह तस्वीर बहुत सुंदर है।", "photograph"),
    ("यह पोशाक सस्ती नहीं, महंगी है।", "dress"),
    ("पुरुष और महिला दोनों यहाँ बैठे हैं।", "male female"),
    ("बंदूक और युद्ध से शांति नहीं मिलती।", "gun war peace"),
    ("अंधे और बहिरे लोगों में भी ऊर्जा होती है।", "blind deaf energy"),
];

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Lexicon {
    /// The vocabulary shipped with the ISL motion dataset.
    pub fn isl() -> Self {
        Lexicon {
            version: 1,
            glosses: GLOSSES
                .iter()
                .enumerate()
                .map(|(i, (text, clip))| Gloss {
                    id: GlossId::from_index(i),
                    text: text.to_string(),
                    clip_name: clip.to_string(),
                })
                .collect(),
            aliases: ALIASES
                .iter()
                .map(|(canonical, variants)| AliasGroup {
                    canonical: canonical.to_string(),
                    variants: strings(variants),
                })
                .collect(),
            stop_words: strings(STOP_WORDS),
            time_words: strings(TIME_WORDS),
            lemma_overrides: LEMMA_OVERRIDES
                .iter()
                .map(|(form, lemma)| LemmaOverride {
                    form: form.to_string(),
                    lemma: lemma.to_string(),
                })
                .collect(),
            suffix_rules: alloc::vec![
                SuffixRule::new("ies", "y", 4),
                SuffixRule::new("ves", "f", 4),
                SuffixRule::new("ing", "", 5),
                SuffixRule::new("ed", "", 4),
                SuffixRule::new("est", "", 5),
                SuffixRule::new("er", "", 4),
                SuffixRule::new("s", "", 4).skipping_double(),
            ],
            categories: CATEGORY_KEYWORDS
                .iter()
                .map(|(category, keywords)| CategoryKeywords {
                    category: *category,
                    keywords: strings(keywords),
                })
                .collect(),
            transliterations: TRANSLITERATIONS
                .iter()
                .map(|(source, target)| Transliteration {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }
}

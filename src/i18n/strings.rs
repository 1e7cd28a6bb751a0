//! Built-in localized strings, split into topical partial dictionaries.
//!
//! These are compiled into the binary and used when no dictionary directory
//! or URL is configured. Topic names match the JSON file names served by the
//! directory and HTTP sources (`navigation.json`, `home.json`, ...).

use crate::i18n::{Dictionary, Language};

/// Topics in their default merge order. Later topics win on key collision.
pub const DEFAULT_TOPICS: &[&str] = &["navigation", "home", "common", "footer"];

type Table = &'static [(&'static str, &'static str)];

// ==================== English Strings ====================

const ENGLISH_NAVIGATION: Table = &[
    ("home", "Home"),
    ("philosophy", "Uyirmai Philosophy"),
    ("projects", "Projects & Events"),
    ("blog", "Blog"),
    ("resources", "Resources"),
    ("getInvolved", "Get Involved"),
    ("products", "Products & Services"),
];

const ENGLISH_HOME: Table = &[
    ("heroTitle", "Cultivating Life Through Permaculture"),
    (
        "heroSubtitle",
        "Join us in creating sustainable communities through organic farming, education, and mindful living practices.",
    ),
    ("heroButton", "Explore Our Mission"),
    ("latestUpdates", "Latest Updates"),
    ("featuredWorkshops", "Featured Workshops"),
    ("learnMore", "Learn More"),
];

const ENGLISH_COMMON: Table = &[
    ("readMore", "Read More"),
    ("contactUs", "Contact Us"),
    ("getStarted", "Get Started"),
    ("loading", "Loading..."),
    ("pageNotFound", "Oops! Page not found"),
    ("returnHome", "Return to Home"),
];

const ENGLISH_FOOTER: Table = &[
    ("followUs", "Follow Us"),
    ("address", "123 Organic Lane, Green Valley, Tamil Nadu 600001"),
    ("phone", "+91 98765 43210"),
    ("email", "hello@uyirmai.org"),
];

// ==================== Tamil Strings ====================

const TAMIL_NAVIGATION: Table = &[
    ("home", "முகப்பு"),
    ("philosophy", "உயிர்மை தத்துவம்"),
    ("projects", "திட்டங்கள் & நிகழ்வுகள்"),
    ("blog", "வலைப்பதிவு"),
    ("resources", "வளங்கள்"),
    ("getInvolved", "பங்கேற்க"),
    ("products", "தயாரிப்புகள் & சேவைகள்"),
];

const TAMIL_HOME: Table = &[
    ("heroTitle", "பெர்மாகல்ச்சர் மூலம் வாழ்வைப் பயிரிடுதல்"),
    (
        "heroSubtitle",
        "இயற்கை விவசாயம், கல்வி மற்றும் நினைவுப்பூர்வமான வாழ்க்கை முறைகள் மூலம் நிலையான சமூகங்களை உருவாக்குவதில் எங்களுடன் சேருங்கள்.",
    ),
    ("heroButton", "எங்கள் நோக்கத்தை ஆராயுங்கள்"),
    ("latestUpdates", "சமீபத்திய புதுப்பிப்புகள்"),
    ("featuredWorkshops", "சிறப்பு பட்டறைகள்"),
    ("learnMore", "மேலும் அறிய"),
];

const TAMIL_COMMON: Table = &[
    ("readMore", "மேலும் படிக்க"),
    ("contactUs", "எங்களை தொடர்பு கொள்ளுங்கள்"),
    ("getStarted", "தொடங்குங்கள்"),
    ("loading", "ஏற்றுகிறது..."),
    ("pageNotFound", "மன்னிக்கவும்! பக்கம் கிடைக்கவில்லை"),
    ("returnHome", "முகப்புக்குத் திரும்பு"),
];

const TAMIL_FOOTER: Table = &[
    ("followUs", "எங்களைப் பின்தொடருங்கள்"),
    ("address", "123 ஆர்கானிக் லேன், கிரீன் வேலி, தமிழ்நாடு 600001"),
    ("phone", "+91 98765 43210"),
    ("email", "hello@uyirmai.org"),
];

/// The built-in table for a (language, topic) pair, if one exists.
pub fn builtin_table(language: Language, topic: &str) -> Option<Table> {
    let table = match (language.code(), topic) {
        ("en", "navigation") => ENGLISH_NAVIGATION,
        ("en", "home") => ENGLISH_HOME,
        ("en", "common") => ENGLISH_COMMON,
        ("en", "footer") => ENGLISH_FOOTER,
        ("ta", "navigation") => TAMIL_NAVIGATION,
        ("ta", "home") => TAMIL_HOME,
        ("ta", "common") => TAMIL_COMMON,
        ("ta", "footer") => TAMIL_FOOTER,
        _ => return None,
    };
    Some(table)
}

/// The built-in partial dictionary for a (language, topic) pair.
pub fn builtin_partial(language: Language, topic: &str) -> Option<Dictionary> {
    builtin_table(language, topic).map(Dictionary::from_pairs)
}

/// Every built-in partial for `language`, merged in default topic order.
pub fn builtin_dictionary(language: Language) -> Dictionary {
    Dictionary::merged(
        DEFAULT_TOPICS
            .iter()
            .filter_map(|topic| builtin_partial(language, topic)),
    )
}

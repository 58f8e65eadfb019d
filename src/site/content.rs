//! Static copy for the public page.

/// Shop name, shown in the navigation bar and footer.
pub const SHOP_NAME: &str = "Gold Standard Barbers";

/// Hero heading.
pub const HERO_TITLE: &str = "Classic Cuts. Modern Craft.";
/// Hero intro text.
pub const HERO_TEXT: &str =
    "Precision haircuts, beard work and hot towel shaves in a chair that feels like home.";
/// Hero call-to-action label.
pub const HERO_CTA: &str = "Book Now";
/// Where the hero call-to-action leads.
pub const HERO_CTA_TARGET: &str = "#book";

/// A card in the services section.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCard {
    /// Card heading
    pub title: &'static str,
    /// Price as displayed
    pub price: &'static str,
    /// One-line summary
    pub description: &'static str,
}

/// Cards in the services section.
pub const SERVICE_CARDS: [ServiceCard; 3] = [
    ServiceCard {
        title: "Haircuts",
        price: "from $30",
        description: "Scissor and clipper cuts, fades and tapers, finished with a hot lather neck shave.",
    },
    ServiceCard {
        title: "Beard Grooming",
        price: "from $20",
        description: "Shape, line up and condition. Beard oil and a straight razor edge included.",
    },
    ServiceCard {
        title: "Hot Towel Shave",
        price: "$35",
        description: "The full ritual: steamed towels, warm lather, two passes and a cold finish.",
    },
];

/// About section paragraphs, one line per entry.
pub const ABOUT: &[&str] = &[
    "We opened our doors with two chairs and one rule: every client leaves sharper",
    "than they arrived. Our barbers trained in traditional shops and still cut the",
    "old way, by hand and by eye, with time taken over every detail.",
    "",
    "Walk-ins welcome, appointments preferred.",
];

/// Contact section lines.
pub const CONTACT: &[&str] = &[
    "Address   123 Main Street, Springfield",
    "Phone     (555) 010-2030",
    "Email     hello@goldstandardbarbers.com",
    "Hours     Tue-Fri 9am-7pm, Sat 8am-4pm, Sun-Mon closed",
];

/// Footer line.
pub const FOOTER: &str = "© Gold Standard Barbers";

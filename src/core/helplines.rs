// crisis helplines shown next to a risk flag

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Helpline {
    pub country: &'static str,
    pub name: &'static str,
    pub number: &'static str,
    pub available: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
    Helpline {
        country: "India",
        name: "iCall",
        number: "9152987821",
        available: "Mon-Sat, 8am-10pm",
    },
    Helpline {
        country: "India",
        name: "Vandrevala Foundation",
        number: "1860-2662-345",
        available: "24/7",
    },
    Helpline {
        country: "USA",
        name: "National Suicide Prevention Lifeline",
        number: "988",
        available: "24/7",
    },
    Helpline {
        country: "USA",
        name: "Crisis Text Line",
        number: "Text HOME to 741741",
        available: "24/7",
    },
    Helpline {
        country: "UK",
        name: "Samaritans",
        number: "116 123",
        available: "24/7",
    },
    Helpline {
        country: "International",
        name: "International Association for Suicide Prevention",
        number: "https://www.iasp.info/resources/Crisis_Centres/",
        available: "Find local helpline",
    },
];

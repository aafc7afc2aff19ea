//! Static candidate catalog used by the selection strategy. Read-only; shared by all requests.

use crate::matchmaking::models::CandidateRecord;

pub static CANDIDATE_CATALOG: &[CandidateRecord] = &[
    CandidateRecord {
        label: "Maya (Outdoor Educator)",
        profile: "Maya is a 29-year-old outdoor educator who spends her weekends leading \
            backcountry hikes and her evenings at open-mic jazz nights. She is warm, \
            talkative, and has a dry sense of humor that sneaks up on people. She wants a \
            partner who is curious about the world and someday hopes to raise kids in a \
            house full of books and muddy boots.",
    },
    CandidateRecord {
        label: "Daniel (Sous Chef)",
        profile: "Daniel is a 32-year-old sous chef at a farm-to-table restaurant who \
            unwinds by cycling along the coast and experimenting with fermentation at home. \
            He is easygoing and playful, quick with a pun, and fiercely loyal to the people \
            he loves. He keeps odd hours but guards his Sundays for long brunches and \
            lazy museum afternoons.",
    },
    CandidateRecord {
        label: "Priya (Data Scientist)",
        profile: "Priya is a 30-year-old data scientist at a climate-tech startup who \
            plays bass in a weekend cover band and never turns down a board-game night. \
            She is analytical but spontaneous, the kind of person who books a trip on a \
            Tuesday and leaves on Friday. She is looking for something serious with \
            someone who can keep up with her curiosity.",
    },
    CandidateRecord {
        label: "Jonah (History Educator)",
        profile: "Jonah is a 34-year-old high school history instructor who coaches the \
            debate team and restores vintage motorcycles in his garage. He is patient, \
            thoughtful, and a surprisingly good dancer once the music starts. He is \
            close with his big family and is ready to start one of his own.",
    },
    CandidateRecord {
        label: "Elena (Architect)",
        profile: "Elena is a 27-year-old architect who sketches city skylines in coffee \
            shops and spends her vacations chasing good light with a film camera. She is \
            quietly confident, a great listener, and has a soft spot for indie films and \
            terrible reality TV. She values honesty above everything and wants a partner \
            who makes her laugh.",
    },
];

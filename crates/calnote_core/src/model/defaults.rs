//! Built-in starter collection.
//!
//! Returned whenever the persisted blob is absent or cannot be decoded, so a
//! fresh or damaged store still opens with meaningful content.

use crate::model::note::{Note, NoteId};
use chrono::{DateTime, TimeZone, Utc};

struct SeedNote {
    id: i64,
    title: &'static str,
    content: &'static str,
    created: (i32, u32, u32, u32, u32),
    modified: (i32, u32, u32, u32, u32),
    is_favorite: bool,
    tags: &'static [&'static str],
}

const SEED_NOTES: &[SeedNote] = &[
    SeedNote {
        id: 1,
        title: "Project Planning Meeting Notes",
        content: "Discussed the upcoming product launch timeline and key milestones.\n\nKey Points:\n- Launch date set for Q2 2024\n- Marketing campaign to start 6 weeks prior\n- Beta testing phase begins next month\n- Need to finalize feature set by end of week\n\nAction Items:\n- Schedule follow-up with design team\n- Review budget allocations\n- Prepare user testing scenarios",
        created: (2024, 1, 15, 10, 30),
        modified: (2024, 1, 16, 14, 20),
        is_favorite: true,
        tags: &["Work", "Meeting", "Project"],
    },
    SeedNote {
        id: 2,
        title: "Book Ideas & Inspiration",
        content: "Random thoughts and ideas for potential book projects.\n\n\"The Art of Digital Minimalism\"\n- Exploring how to maintain focus in a hyperconnected world\n- Personal stories of digital detox experiences\n- Practical frameworks for intentional technology use\n\n\"Cooking Adventures\"\n- Collection of family recipes with stories\n- Seasonal cooking guides\n- Tips for sustainable cooking practices",
        created: (2024, 1, 14, 16, 45),
        modified: (2024, 1, 14, 16, 45),
        is_favorite: false,
        tags: &["Personal", "Ideas", "Creative"],
    },
    SeedNote {
        id: 3,
        title: "Weekly Reflection - January",
        content: "Reflecting on the first week of January and setting intentions.\n\nAccomplishments:\n- Completed the React dashboard project\n- Started morning meditation routine\n- Read 2 chapters of \"Atomic Habits\"\n- Organized home office space\n\nChallenges:\n- Struggled with time management\n- Need to improve work-life balance\n- Should drink more water throughout the day\n\nNext Week Goals:\n- Implement new project management system\n- Schedule regular breaks during work\n- Plan weekend hiking trip",
        created: (2024, 1, 13, 20, 15),
        modified: (2024, 1, 15, 9, 30),
        is_favorite: true,
        tags: &["Personal", "Reflection", "Goals"],
    },
    SeedNote {
        id: 4,
        title: "Recipe: Grandmother's Apple Pie",
        content: "Traditional apple pie recipe passed down from grandmother.\n\nIngredients:\n- 6-8 Granny Smith apples, peeled and sliced\n- 1 cup granulated sugar\n- 2 tablespoons all-purpose flour\n- 1 teaspoon ground cinnamon\n- 1/4 teaspoon ground nutmeg\n- 2 tablespoons butter, cut into small pieces\n- 2 pie crusts (homemade or store-bought)\n\nInstructions:\n1. Preheat oven to 425°F\n2. Mix apples with sugar, flour, and spices\n3. Place filling in bottom crust\n4. Add butter pieces on top\n5. Cover with top crust and seal edges\n6. Bake for 45-50 minutes until golden brown",
        created: (2024, 1, 12, 14, 20),
        modified: (2024, 1, 12, 14, 20),
        is_favorite: false,
        tags: &["Personal", "Recipe", "Family"],
    },
    SeedNote {
        id: 5,
        title: "Client Meeting - Website Redesign",
        content: "Meeting with Johnson & Associates about their website redesign project.\n\nClient Requirements:\n- Modern, professional design\n- Mobile-responsive layout\n- Integration with existing CRM system\n- SEO optimization\n- Content management system\n\nTimeline:\n- Design mockups: 2 weeks\n- Development phase: 4 weeks\n- Testing and revisions: 1 week\n- Launch: End of February\n\nNext Steps:\n- Send project proposal\n- Schedule design review meeting\n- Gather brand assets and content",
        created: (2024, 1, 11, 11, 0),
        modified: (2024, 1, 13, 16, 45),
        is_favorite: true,
        tags: &["Work", "Client", "Project"],
    },
    SeedNote {
        id: 6,
        title: "Travel Plans - Summer Vacation",
        content: "Planning summer vacation to Europe - tentative itinerary.\n\nDestinations:\n- Paris, France (3 days)\n- Rome, Italy (4 days)\n- Barcelona, Spain (3 days)\n\nBest time to book: March for better rates\n\nTo Research:\n- Travel insurance options\n- Best neighborhoods to stay in each city\n- Local transportation passes",
        created: (2024, 1, 10, 19, 30),
        modified: (2024, 1, 14, 12, 15),
        is_favorite: false,
        tags: &["Personal", "Travel", "Planning"],
    },
    SeedNote {
        id: 7,
        title: "Learning Goals 2024",
        content: "Professional and personal learning objectives for this year.\n\nTechnical Skills:\n- Learn TypeScript fundamentals\n- Explore AI/ML basics with Python\n- Get AWS certification\n\nPersonal Development:\n- Improve public speaking skills\n- Learn basic Spanish conversation\n- Read 24 books this year (2 per month)\n\nProgress Tracking:\n- Monthly review sessions\n- Quarterly goal adjustments\n- Annual reflection and planning",
        created: (2024, 1, 9, 8, 45),
        modified: (2024, 1, 9, 8, 45),
        is_favorite: true,
        tags: &["Personal", "Goals", "Learning"],
    },
    SeedNote {
        id: 8,
        title: "Home Improvement Ideas",
        content: "Ideas and plans for improving our home this year.\n\nLiving Room:\n- Replace old sofa with sectional\n- Add floating shelves for books\n- Install smart lighting system\n\nKitchen:\n- Update cabinet hardware\n- Install subway tile backsplash\n- Organize pantry with clear containers\n\nPriority: Kitchen updates first\nTimeline: Complete by summer",
        created: (2024, 1, 8, 15, 20),
        modified: (2024, 1, 11, 10, 30),
        is_favorite: false,
        tags: &["Personal", "Home", "Planning"],
    },
];

/// Returns the built-in starter collection.
pub fn default_notes() -> Vec<Note> {
    SEED_NOTES
        .iter()
        .map(|seed| Note {
            id: NoteId::Number(seed.id),
            title: seed.title.to_string(),
            content: seed.content.to_string(),
            tags: seed.tags.iter().map(|tag| (*tag).to_string()).collect(),
            category: None,
            is_favorite: seed.is_favorite,
            created_at: seed_instant(seed.created),
            modified_at: seed_instant(seed.modified),
        })
        .collect()
}

fn seed_instant((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

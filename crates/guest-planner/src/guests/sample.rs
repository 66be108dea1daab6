//! Built-in demo guest list used by the CLI demo and optional store seeding.

use super::domain::{Guest, GuestCategory, GuestDraft, GuestId};

use GuestCategory::*;

type Template = (&'static str, GuestCategory, u8, u8, u8, Option<&'static str>);

// Bridal party members are filed under Close Friends and tagged in their notes.
const SAMPLE_GUESTS: [Template; 40] = [
    ("Emma Thompson", CloseFriends, 10, 10, 10, Some("Bridal party, maid of honor")),
    ("James Wilson", CloseFriends, 10, 9, 10, Some("Bridal party, best man")),
    ("Sophie Martinez", CloseFriends, 9, 10, 10, Some("Bridal party")),
    ("Ryan Anderson", CloseFriends, 10, 8, 10, Some("Bridal party")),
    ("Olivia Brown", CloseFriends, 8, 10, 9, Some("Bridal party")),
    ("Michael Chen", CloseFriends, 9, 9, 10, Some("Bridal party")),
    ("Robert Wilson", GroomsFamily, 10, 8, 10, Some("Father of the Groom")),
    ("Patricia Wilson", GroomsFamily, 10, 8, 10, Some("Mother of the Groom")),
    ("David Wilson", GroomsFamily, 10, 7, 9, Some("Brother")),
    ("Jennifer Wilson", GroomsFamily, 9, 7, 9, Some("Sister-in-law")),
    ("William Wilson", GroomsFamily, 9, 6, 8, Some("Uncle")),
    ("Margaret Wilson", GroomsFamily, 9, 6, 8, Some("Aunt")),
    ("Thomas Wilson", GroomsFamily, 9, 6, 8, Some("Cousin")),
    ("Elizabeth Wilson", GroomsFamily, 9, 6, 8, Some("Cousin")),
    ("John Thompson", BridesFamily, 8, 10, 10, Some("Father of the Bride")),
    ("Mary Thompson", BridesFamily, 8, 10, 10, Some("Mother of the Bride")),
    ("Sarah Thompson", BridesFamily, 7, 10, 9, Some("Sister")),
    ("Daniel Thompson", BridesFamily, 7, 9, 9, Some("Brother-in-law")),
    ("Richard Thompson", BridesFamily, 6, 8, 8, Some("Uncle")),
    ("Catherine Thompson", BridesFamily, 6, 8, 8, Some("Aunt")),
    ("Christopher Thompson", BridesFamily, 6, 7, 8, Some("Cousin")),
    ("Amanda Thompson", BridesFamily, 6, 7, 8, Some("Cousin")),
    ("Alex Johnson", CloseFriends, 9, 9, 9, Some("College roommate")),
    ("Jessica Lee", CloseFriends, 8, 9, 9, None),
    ("Mark Davis", CloseFriends, 9, 8, 8, None),
    ("Lauren Taylor", CloseFriends, 8, 9, 8, None),
    ("Kevin White", CloseFriends, 9, 7, 8, None),
    ("Nicole Garcia", CloseFriends, 7, 9, 8, None),
    ("Brian Miller", Friends, 7, 6, 7, None),
    ("Rachel Green", Friends, 6, 7, 7, None),
    ("Steven Harris", Friends, 7, 6, 6, None),
    ("Michelle Clark", Friends, 6, 7, 6, None),
    ("Robert Martinez", Colleagues, 5, 4, 6, Some("Work colleague")),
    ("Lisa Anderson", Colleagues, 4, 5, 5, Some("Work colleague")),
    ("Paul Jackson", Colleagues, 5, 4, 5, Some("Work colleague")),
    ("Michael O'Brien", OutOfTown, 7, 6, 6, Some("Traveling from Ireland")),
    ("Emily Foster", OutOfTown, 6, 7, 5, Some("Traveling from California")),
    ("Sarah's Plus One", SignificantOther, 5, 6, 7, Some("Guest of Sarah Thompson")),
    ("Alex's Plus One", SignificantOther, 6, 5, 7, Some("Guest of Alex Johnson")),
    ("Photographer Team", Vendors, 3, 3, 10, Some("Wedding photographer")),
];

pub fn sample_drafts() -> Vec<GuestDraft> {
    SAMPLE_GUESTS
        .iter()
        .map(|&(name, category, groom, bridesmaid, attendance, notes)| {
            let draft = GuestDraft::new(name, category, groom, bridesmaid, attendance);
            match notes {
                Some(notes) => draft.with_notes(notes),
                None => draft,
            }
        })
        .collect()
}

/// Sample drafts turned into guests with `sample-N` ids.
pub fn sample_guests() -> Vec<Guest> {
    sample_drafts()
        .into_iter()
        .enumerate()
        .map(|(index, draft)| Guest::new(GuestId(format!("sample-{}", index + 1)), draft))
        .collect()
}

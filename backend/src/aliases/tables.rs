//! Static alias data.
//!
//! Each entry maps a variant spelling seen in the stewards' documents to its
//! canonical form. Allegation and outcome keys are lowercase because those
//! tables are looked up case-insensitively. No canonical value may itself be
//! a key that maps elsewhere.

pub(crate) const DRIVER_ALIASES: &[(&str, &str)] = &[
    ("Alexander Albon", "Alex Albon"),
    ("Carlos Sainz Jnr", "Carlos Sainz"),
];

pub(crate) const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Red Bull Racing", "Red Bull"),
    ("Scuderia Ferrari", "Ferrari"),
    ("McLaren Formula 1 Team", "McLaren"),
    ("Racing Bulls", "RB"),
    ("VCARB", "RB"),
];

pub(crate) const STEWARD_ALIASES: &[(&str, &str)] = &[
    ("Loic Bacqulaine", "Loic Bacquelaine"),
    ("Matheiu Remmerie", "Mathieu Remmerie"),
    ("Velerio Brizzolari", "Valerio Brizzolari"),
    ("Alfonso Oros", "Alfonso Oros Trigueros"),
    ("Hasan Al Aldabi", "Hassan Alabdali"),
    ("Hassan AlAbdali", "Hassan Alabdali"),
    ("Liuzzi", "Vitantonio Liuzzi"),
    ("Tonio Luizzi", "Vitantonio Liuzzi"),
    ("Vitantonio", "Vitantonio Liuzzi"),
    ("Matt Selley", "Mathew Selley"),
    ("Mohammed Al Hashmi", "Mohamed Al Hashmi"),
    ("Richard Nordbury", "Richard Norbury"),
];

pub(crate) const ALLEGATION_ALIASES: &[(&str, &str)] = &[
    ("aborted start infringement", "Aborted Start Infringement"),
    ("behavior during drivers' meeting", "Behavior During Drivers' Meeting"),
    ("blue flag infringement", "Blue Flag Infringement"),
    ("causing a collision", "Causing a Collision"),
    ("changes made under parc ferme", "Changes made under Parc Ferme"),
    ("continuing in an unsafe condition", "Continuing in Unsafe Condition"),
    ("continuing in unsafe condition", "Continuing in Unsafe Condition"),
    ("crossing the track without permission", "Crossing the Track w/o Permission"),
    ("dangerous driving", "Dangerous Driving"),
    ("driving erratically", "Driving Erratically"),
    ("driving under unsafe conditions", "Continuing in Unsafe Condition"),
    ("driving unnecessarily slowly", "Driving Unnecessarily Slowly"),
    ("drs infringement", "DRS Infringement"),
    ("equipment in pit lane", "Pit Lane Infringement"),
    ("exceeded track limits", "Multiple Track Limits Violations"),
    ("exceeding delta time", "Exceeding Delta Time"),
    ("failure to comply with red flag", "Red Flag Infringement"),
    (
        "failure to follow race director's instructions",
        "Failure to follow race director's instructions",
    ),
    ("failure to maintain distance to safety car", "Safety Car Infringement"),
    ("failure to provide fuel sample", "Technical Infringement"),
    ("failure to serve penalty", "Failure to Serve Penalty"),
    ("false start", "False Start"),
    ("forcing another car off the track", "Forcing Another Car Off Track"),
    ("impeding", "Impeding"),
    ("impeding at pit exit", "Impeding"),
    ("incorrect starting position", "Incorrect Starting Position"),
    ("language infringement", "Language Infringement"),
    (
        "leaving the track and gaining an advantage",
        "Leaving the Track and Gaining an Advantage",
    ),
    (
        "leaving the track and rejoining unsafely",
        "Leaving the Track and Rejoining Unsafely",
    ),
    (
        "leaving track and gaining an advantage",
        "Leaving the Track and Gaining an Advantage",
    ),
    ("media/fan activity infringement", "Media/Fan Activity Infringement"),
    ("multiple track limits violations", "Multiple Track Limits Violations"),
    ("new power unit element(s)", "New power unit element(s)"),
    ("overtaking under safety car", "Safety Car Infringement"),
    ("overtaking under yellow flags", "Yellow Flag Infringement"),
    ("parc ferme infringement", "Parc Ferme Infringement"),
    ("parc ferme violation", "Parc Ferme Infringement"),
    ("penalty point infringement", "Exceeding 12 Penalty Points"),
    ("pit lane incident", "Pit Lane Incident"),
    ("pit lane infringement", "Pit Lane Infringement"),
    ("pit lane speeding", "Pit Lane Speeding"),
    ("potentially dangerous driving", "Dangerous Driving"),
    ("practice start infringement", "Practice Start Infringement"),
    ("practice start violation", "Practice Start Infringement"),
    ("received physical assistance", "Technical Infringement"),
    ("red flag infringement", "Red Flag Infringement"),
    ("refusal to visit medical center", "Refusal to Visit Medical Center"),
    ("restart infringement", "Restart Infringement"),
    ("rolling start infringement", "Rolling Start Infringement"),
    ("safety car infringement", "Safety Car Infringement"),
    ("safety procedure infringement", "Safety Procedure Infringement"),
    ("speeding in pit lane", "Pit Lane Speeding"),
    ("technical infringement", "Technical Infringement"),
    ("technical non-compliance", "Technical Infringement"),
    ("tyre operating procedure infringement", "Tyre Procedure Infringement"),
    ("tyre procedure infringement", "Tyre Procedure Infringement"),
    ("unsafe release", "Unsafe Release"),
    ("unsportsmanlike behavior", "Unsportsmanlike Behavior"),
    ("use of driver aid during formation lap", "Technical Infringement"),
    ("wearing of jewelry", "Wearing of Jewelry"),
    ("yellow flag infringement", "Yellow Flag Infringement"),
    ("yellow flag infringment", "Yellow Flag Infringement"),
];

pub(crate) const OUTCOME_ALIASES: &[(&str, &str)] = &[
    ("10 second stop and go", "10 Second Stop and Go"),
    ("10 second stop and go penalty", "10 Second Stop and Go"),
    ("community service", "Community Service"),
    ("drive through penalty", "Drive Through Penalty"),
    ("dsq", "DSQ"),
    ("fine", "Fine"),
    ("gird penalty", "Grid Penalty"),
    ("grid penalty", "Grid Penalty"),
    ("lap time deleted", "Lap Time Deleted"),
    ("license suspension", "License Suspension"),
    ("no further action", "No Further Action"),
    ("no penalty applied", "No Further Action"),
    ("penalty points", "Penalty Points"),
    ("q2 laptimes deleted", "Lap Time Deleted"),
    ("reprimand", "Reprimand"),
    ("start from back of grid", "Grid Penalty"),
    ("start from pit lane", "Grid Penalty"),
    ("time penalty", "Time Penalty"),
    ("warning", "Warning"),
];

/// Team names that were mistakenly entered in the Driver column.
pub(crate) const INVALID_DRIVERS: &[&str] = &["McLaren Formula 1 Team", "Mclaren Formula 1 Team"];

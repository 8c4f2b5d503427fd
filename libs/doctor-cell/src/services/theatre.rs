/// Default operation theatres per surgical specialization.
const THEATRES_BY_SPECIALIZATION: &[(&str, &[&str])] = &[
    ("General Surgeon", &["OT-1 – General OT 1", "OT-2 – General OT 2"]),
    ("Orthopedic Surgeon", &["OT-4 – Orthopedic OT"]),
    ("Cardiac Surgeon", &["OT-13 – Cardiac OT"]),
    ("Neurosurgeon", &["OT-14 – Neurosurgery OT"]),
    ("Gynecologist", &["OT-6 – Obstetrics & Gynecology OT"]),
    ("Urologist", &["OT-7 – Urology OT"]),
    ("ENT Specialist", &["OT-5 – ENT / Head & Neck OT"]),
    ("Ophthalmologist", &["OT-10 – Eye OT"]),
    ("Plastic Surgeon", &["OT-9 – Plastic & Reconstructive OT"]),
    ("Vascular Surgeon", &["OT-12 – Vascular OT"]),
    ("Pediatric Surgeon", &["OT-11 – Pediatric Surgery OT"]),
];

/// Theatres usually booked for a specialization, first choice first.
/// Unknown specializations get no suggestion.
pub fn suggest_theatres(specialization: &str) -> &'static [&'static str] {
    let specialization = specialization.trim();
    THEATRES_BY_SPECIALIZATION
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(specialization))
        .map(|(_, theatres)| *theatres)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_specializations_map_to_theatres() {
        assert_eq!(
            suggest_theatres("General Surgeon"),
            &["OT-1 – General OT 1", "OT-2 – General OT 2"]
        );
        assert_eq!(suggest_theatres(" urologist "), &["OT-7 – Urology OT"]);
    }

    #[test]
    fn unknown_specialization_has_no_suggestion() {
        assert!(suggest_theatres("Anesthesiologist").is_empty());
        assert!(suggest_theatres("").is_empty());
    }
}

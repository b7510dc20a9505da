/// Punctuation kept in canonical labels besides ASCII alphanumerics and spaces.
const KEPT_PUNCTUATION: [char; 2] = ['&', '/'];

/// Canonicalize a brand/category label into its stored comparison form.
///
/// Steps, in order:
/// - uppercase (ASCII)
/// - trim leading/trailing whitespace
/// - drop every character outside `{A-Z, 0-9, space, &, /}`
/// - collapse internal whitespace runs to a single space
///
/// Plurals are kept verbatim: `normalize("sweaters")` is `"SWEATERS"`.
/// Total and idempotent; every stored brand/category passes through here
/// before it is persisted or compared.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.trim().chars() {
        let ch = ch.to_ascii_uppercase();
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() && !KEPT_PUNCTUATION.contains(&ch) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

/// Absent input canonicalizes to the empty label.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{distributions::Uniform, Rng, SeedableRng};

    #[test]
    fn empty_and_absent_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("  nike ")), "NIKE");
    }

    #[test]
    fn uppercases_and_trims() {
        assert_eq!(normalize("  nike   "), "NIKE");
        assert_eq!(normalize("lulu lemon"), "LULU LEMON");
    }

    #[test]
    fn strips_punctuation_without_inserting_spaces() {
        assert_eq!(normalize("Saint-Laurent!"), "SAINTLAURENT");
        assert_eq!(normalize("Dolce & Gabbana"), "DOLCE & GABBANA");
        assert_eq!(normalize("Shirts/Tops"), "SHIRTS/TOPS");
        assert_eq!(normalize("Comme des Garçons"), "COMME DES GARONS");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize("a  -  b"), "A B");
        assert_eq!(normalize("TOM \t FORD"), "TOM FORD");
    }

    #[test]
    fn keeps_plurals() {
        assert_eq!(normalize("sweaters"), "SWEATERS");
        assert_eq!(normalize("JEANS"), "JEANS");
    }

    #[test]
    fn idempotent_on_random_printable_strings() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5a1e);
        let printable = Uniform::new_inclusive(0x20u8, 0x7eu8);
        for _ in 0..100 {
            let len = rng.gen_range(0..40);
            let s: String = (&mut rng)
                .sample_iter(printable)
                .take(len)
                .map(char::from)
                .collect();
            let once = normalize(&s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}

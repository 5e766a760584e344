use rand::Rng;

use crate::name::pick;

pub const EMAIL_NAMES: &[&str] = &["test", "user", "qa", "demo"];
pub const EMAIL_DOMAINS: &[&str] = &["gmail.com", "mail.com", "example.com"];

/// `<name><0..=9999>@<domain>`
pub fn generate_email() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..=9999);
    format!("{}{}@{}", pick(EMAIL_NAMES), suffix, pick(EMAIL_DOMAINS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_has_known_name_number_and_domain() {
        for _ in 0..200 {
            let email = generate_email();
            let (local, domain) = email.split_once('@').expect("email has @");
            assert!(EMAIL_DOMAINS.contains(&domain));
            let name = local.trim_end_matches(|c: char| c.is_ascii_digit());
            assert!(EMAIL_NAMES.contains(&name), "unexpected name in {email}");
            let number: u32 = local[name.len()..].parse().expect("numeric suffix");
            assert!(number <= 9999);
        }
    }
}

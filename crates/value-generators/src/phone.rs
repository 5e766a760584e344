use rand::Rng;

/// Russian mobile number, `+7 9XX XXX-XX-XX`.
pub fn generate_phone() -> String {
    let mut rng = rand::thread_rng();
    let operator: u32 = rng.gen_range(900..=999);
    let block: u32 = rng.gen_range(100..=999);
    let pair_a: u32 = rng.gen_range(10..=99);
    let pair_b: u32 = rng.gen_range(10..=99);
    format!("+7 {operator} {block}-{pair_a}-{pair_b}")
}

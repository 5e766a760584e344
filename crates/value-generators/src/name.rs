//! Person name parts. Gendered lists are mixed freely.

use rand::seq::SliceRandom;

pub const FIRST_NAMES: &[&str] = &[
    "Иван",
    "Пётр",
    "Алексей",
    "Мария",
    "Екатерина",
    "Сергей",
    "Анна",
];

pub const LAST_NAMES: &[&str] = &[
    "Иванов",
    "Петров",
    "Сидоров",
    "Кузнецов",
    "Смирнов",
    "Васильев",
    "Фёдоров",
];

pub const PATRONYMICS: &[&str] = &[
    "Иванович",
    "Петрович",
    "Фёдорович",
    "Сергеевич",
    "Алексеевич",
    "Андреевич",
    "Дмитриевич",
];

pub(crate) fn pick(list: &[&str]) -> String {
    list.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

pub fn generate_first_name() -> String {
    pick(FIRST_NAMES)
}

pub fn generate_last_name() -> String {
    pick(LAST_NAMES)
}

pub fn generate_patronymic() -> String {
    pick(PATRONYMICS)
}

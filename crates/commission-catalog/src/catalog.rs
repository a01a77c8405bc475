//! Built-in static catalog and lookup helpers over category trees.

use crate::types::Category;

type Entry = (i64, &'static str, f64);

const CATALOG: &[(Entry, &[Entry])] = &[
    (
        (1, "Elektronik", 12.5),
        &[
            (101, "Cep Telefonu", 13.5),
            (102, "Bilgisayar & Tablet", 11.8),
            (103, "TV & Ses Sistemleri", 12.2),
            (104, "Kulaklık", 14.0),
            (105, "Akıllı Saat", 15.0),
            (106, "Oyun & Konsol", 10.5),
            (107, "Fotoğraf & Kamera", 13.0),
            (108, "Elektrikli Ev Aletleri", 11.0),
        ],
    ),
    (
        (2, "Moda", 15.0),
        &[
            (201, "Kadın Giyim", 15.5),
            (202, "Erkek Giyim", 14.8),
            (203, "Çocuk Giyim", 14.0),
            (204, "Ayakkabı", 16.0),
            (205, "Çanta", 17.0),
            (206, "Aksesuar & Takı", 18.0),
            (207, "İç Giyim", 15.5),
            (208, "Büyük Beden", 15.0),
        ],
    ),
    (
        (3, "Ev & Yaşam", 10.5),
        &[
            (301, "Mobilya", 11.0),
            (302, "Mutfak & Sofra", 9.5),
            (303, "Dekorasyon", 10.0),
            (304, "Bahçe & Yapı Market", 9.0),
            (305, "Temizlik", 8.5),
            (306, "Ev Tekstili", 12.0),
            (307, "Aydınlatma", 11.5),
            (308, "Banyo", 10.5),
        ],
    ),
    (
        (4, "Kozmetik & Kişisel Bakım", 16.0),
        &[
            (401, "Makyaj", 16.5),
            (402, "Cilt Bakımı", 15.8),
            (403, "Parfüm", 17.0),
            (404, "Saç Bakımı", 15.0),
            (405, "Kişisel Bakım", 14.5),
            (406, "Ağız & Diş Bakımı", 13.5),
            (407, "Erkek Bakım & Tıraş", 14.0),
        ],
    ),
    (
        (5, "Spor & Outdoor", 13.0),
        &[
            (501, "Spor Giyim", 13.5),
            (502, "Spor Ayakkabısı", 14.0),
            (503, "Fitness & Kondisyon", 12.8),
            (504, "Outdoor", 11.5),
            (505, "Bisiklet", 12.0),
            (506, "Su Sporları", 13.5),
            (507, "Kış Sporları", 14.5),
        ],
    ),
    (
        (6, "Kitap, Müzik & Film", 8.0),
        &[
            (601, "Kitap", 8.5),
            (602, "Dergi", 7.0),
            (603, "Müzik", 7.5),
            (604, "Film", 8.0),
            (605, "Oyun", 12.0),
            (606, "Hobi", 10.0),
        ],
    ),
    (
        (7, "Anne & Bebek", 11.0),
        &[
            (701, "Bebek Giyim", 11.5),
            (702, "Bebek Bakım", 10.5),
            (703, "Bebek Oyuncak", 12.0),
            (704, "Bebek Arabası & Oto Koltuğu", 10.0),
            (705, "Emzirme & Beslenme", 11.0),
            (706, "Bebek Odası", 10.5),
            (707, "Anne", 12.0),
        ],
    ),
    (
        (8, "Otomotiv & Motosiklet", 9.0),
        &[
            (801, "Oto Aksesuar", 9.5),
            (802, "Oto Yedek Parça", 8.5),
            (803, "Oto Bakım", 9.0),
            (804, "Motosiklet", 10.0),
            (805, "Motorsiklet Aksesuar", 10.5),
        ],
    ),
    (
        (9, "Süpermarket", 7.0),
        &[
            (901, "Gıda", 7.5),
            (902, "İçecek", 7.0),
            (903, "Temizlik & Kağıt", 6.5),
            (904, "Kişisel Bakım", 8.0),
            (905, "Bebek", 7.5),
            (906, "Pet Shop", 8.5),
        ],
    ),
    (
        (10, "Oyuncak", 12.0),
        &[
            (1001, "Eğitici Oyuncak", 12.5),
            (1002, "Bebek & Oyuncak Bebek", 12.0),
            (1003, "Oyuncak Araba", 11.5),
            (1004, "Puzzle", 11.0),
            (1005, "Sanat & Zanaat", 10.0),
            (1006, "Açık Hava Oyuncakları", 12.5),
        ],
    ),
    (
        (11, "Saat & Aksesuar", 18.0),
        &[
            (1101, "Erkek Saat", 18.5),
            (1102, "Kadın Saat", 18.5),
            (1103, "Çocuk Saat", 17.0),
            (1104, "Akıllı Saat", 15.0),
            (1105, "Saat Aksesuar", 19.0),
        ],
    ),
    (
        (12, "Yapı Market", 8.0),
        &[
            (1201, "El Aletleri", 8.5),
            (1202, "Elektrikli Aletler", 9.0),
            (1203, "Bahçe Aletleri", 8.0),
            (1204, "Hırdavat", 7.5),
            (1205, "Elektrik & Tesisat", 8.5),
        ],
    ),
];

/// The hard-coded fallback tree: 12 top-level categories with their
/// subcategories and commission rates.
pub fn static_catalog() -> Vec<Category> {
    CATALOG
        .iter()
        .map(|&((id, name, rate), children)| {
            Category::new(id, name, rate).with_sub_categories(
                children
                    .iter()
                    .map(|&(id, name, rate)| Category::new(id, name, rate))
                    .collect(),
            )
        })
        .collect()
}

/// A category located in a tree, with its parent when it is a subcategory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMatch<'a> {
    pub category: &'a Category,
    pub parent: Option<&'a Category>,
}

impl CategoryMatch<'_> {
    /// "Parent > Child" for subcategories, the bare name otherwise.
    pub fn display_path(&self) -> String {
        match self.parent {
            Some(parent) => format!("{} > {}", parent.name, self.category.name),
            None => self.category.name.clone(),
        }
    }
}

/// Find a category by id. Top-level entries take precedence over
/// subcategories; among subcategories the first parent in order wins.
pub fn find_category(tree: &[Category], id: i64) -> Option<CategoryMatch<'_>> {
    if let Some(category) = tree.iter().find(|c| c.id == id) {
        return Some(CategoryMatch {
            category,
            parent: None,
        });
    }
    tree.iter().find_map(|parent| {
        parent
            .sub_categories
            .iter()
            .find(|c| c.id == id)
            .map(|category| CategoryMatch {
                category,
                parent: Some(parent),
            })
    })
}

/// Top-level entries, each followed by its direct subcategories.
pub fn flatten(tree: &[Category]) -> Vec<&Category> {
    tree.iter()
        .flat_map(|c| std::iter::once(c).chain(c.sub_categories.iter()))
        .collect()
}

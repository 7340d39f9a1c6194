/// A category page on the agency site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub slug: &'static str,
    pub name: &'static str,
    /// Path relative to the site root.
    pub path: &'static str,
}

impl CategorySpec {
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// A parent category with the sub-categories scraped after it.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTree {
    pub parent: CategorySpec,
    pub children: &'static [CategorySpec],
}

pub const PARENT_CATEGORY_TYPE: &str = "parent";
pub const SUBCATEGORY_TYPE: &str = "subcategory";

const FARMAKA_CHILDREN: &[CategorySpec] = &[
    CategorySpec {
        slug: "adeia-dynatotitas-paragogis-diakinisis-farmaka",
        name: "Άδεια δυνατότητας παραγωγής/διακίνησης",
        path: "/category/farmaka/adeia-dynatotitas-paragogis-diakinisis-farmaka/",
    },
    CategorySpec {
        slug: "anakliseis-farmakon-anthropinis-xrisis-farmaka",
        name: "Ανακλήσεις φαρμάκων ανθρώπινης χρήσης",
        path: "/category/farmaka/anakliseis-farmakon-anthropinis-xrisis-farmaka/",
    },
    // "farnaka" is the agency's own spelling of this slug
    CategorySpec {
        slug: "anakoinoseis-timologisis-farmakon-farnaka",
        name: "Ανακοινώσεις τιμολόγησης φαρμάκων",
        path: "/category/farmaka/anakoinoseis-timologisis-farmakon-farnaka/",
    },
    CategorySpec {
        slug: "anakoinoseis-farmaka",
        name: "Ανακοινώσεις φαρμάκων",
        path: "/category/farmaka/anakoinoseis-farmaka/",
    },
    CategorySpec {
        slug: "egkyklioi-drastikon-ousion-farmaka",
        name: "Εγκύκλιοι δραστικών ουσιών",
        path: "/category/farmaka/egkyklioi-drastikon-ousion-farmaka/",
    },
    CategorySpec {
        slug: "klinikes-meletes",
        name: "Κλινικές μελέτες",
        path: "/category/farmaka/klinikes-meletes/",
    },
    CategorySpec {
        slug: "parigoritiki-xrisi-farmaka",
        name: "Παρηγορητική χρήση",
        path: "/category/farmaka/parigoritiki-xrisi-farmaka/",
    },
    CategorySpec {
        slug: "farmakoepagripnisi-farmaka",
        name: "Φαρμακοεπαγρύπνηση",
        path: "/category/farmaka/farmakoepagripnisi-farmaka/",
    },
];

pub const EOF_CATALOGUE: &[CategoryTree] = &[CategoryTree {
    parent: CategorySpec {
        slug: "farmaka",
        name: "Φάρμακα",
        path: "/category/farmaka/",
    },
    children: FARMAKA_CHILDREN,
}];

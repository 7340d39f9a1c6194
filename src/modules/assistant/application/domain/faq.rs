/// One canned question with the keywords that point to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
    pub keywords: &'static [&'static str],
}

pub const FALLBACK_ANSWER: &str = "Λυπάμαι, δεν κατάλαβα την ερώτησή σας. Μπορείτε να ρωτήσετε για: τιμές, ειδοποιήσεις, ασφάλεια, ακύρωση συνδρομής ή να αναζητήσετε συγκεκριμένα φάρμακα και ανακοινώσεις. Για περισσότερη βοήθεια επικοινωνήστε στο info@drugalert.gr";

pub const FAQ_CATALOGUE: &[FaqEntry] = &[
    FaqEntry {
        question: "Τι είναι το DrugAlert.gr;",
        answer: "Το DrugAlert.gr είναι μια υπηρεσία που σας ενημερώνει άμεσα για όλες τις ανακοινώσεις του ΕΟΦ σχετικά με ανακλήσεις φαρμάκων, ιατροτεχνολογικών προϊόντων και άλλες σημαντικές ενημερώσεις για την υγεία σας.",
        keywords: &["τι είναι", "drugalert", "υπηρεσία", "eof"],
    },
    FaqEntry {
        question: "Πόσο κοστίζει η υπηρεσία;",
        answer: "Προσφέρουμε 10 ημέρες δωρεάν δοκιμή χωρίς πιστωτική κάρτα. Μετά τη δοκιμαστική περίοδο, η ετήσια συνδρομή κοστίζει €49.",
        keywords: &["κόστος", "τιμή", "πόσο", "συνδρομή", "πληρωμή"],
    },
    FaqEntry {
        question: "Πώς λειτουργούν οι ειδοποιήσεις;",
        answer: "Ελέγχουμε την ιστοσελίδα του ΕΟΦ κάθε 15 λεπτά. Όταν εντοπίσουμε νέα ανακοίνωση, λαμβάνετε άμεσα ειδοποίηση μέσω email και push notifications στον browser ή το κινητό σας.",
        keywords: &["ειδοποιήσεις", "notifications", "πώς", "λειτουργεί", "email", "push"],
    },
    FaqEntry {
        question: "Μπορώ να ακυρώσω τη συνδρομή μου;",
        answer: "Ναι, μπορείτε να ακυρώσετε τη συνδρομή σας οποιαδήποτε στιγμή από τις ρυθμίσεις του λογαριασμού σας. Θα συνεχίσετε να έχετε πρόσβαση μέχρι το τέλος της τρέχουσας περιόδου χρέωσης.",
        keywords: &["ακύρωση", "cancel", "συνδρομή", "διακοπή"],
    },
    FaqEntry {
        question: "Τι είδους ανακοινώσεις θα λαμβάνω;",
        answer: "Θα λαμβάνετε όλες τις ανακοινώσεις του ΕΟΦ που αφορούν ανακλήσεις φαρμάκων και ιατροτεχνολογικών προϊόντων, προειδοποιήσεις ασφαλείας και ενημερώσεις για παρτίδες προϊόντων.",
        keywords: &["ανακοινώσεις", "είδος", "ανακλήσεις", "φάρμακα", "ιατροτεχνολογικά"],
    },
    FaqEntry {
        question: "Πώς ενεργοποιώ τις push notifications;",
        answer: "Μετά τη σύνδεσή σας θα εμφανιστεί ένα παράθυρο που σας ζητά να ενεργοποιήσετε τις push notifications. Πατήστε 'Ενεργοποίηση' και στη συνέχεια 'Επιτρέπω' στο παράθυρο του browser.",
        keywords: &["push", "notifications", "ενεργοποίηση", "browser", "ειδοποιήσεις"],
    },
    FaqEntry {
        question: "Είναι ασφαλή τα δεδομένα μου;",
        answer: "Ναι, όλες οι συνδέσεις είναι κρυπτογραφημένες και ακολουθούμε πλήρως τον κανονισμό GDPR. Τα προσωπικά σας δεδομένα δεν κοινοποιούνται σε τρίτους.",
        keywords: &["ασφάλεια", "δεδομένα", "gdpr", "προσωπικά", "κρυπτογράφηση"],
    },
    FaqEntry {
        question: "Πώς μπορώ να επικοινωνήσω μαζί σας;",
        answer: "Μπορείτε να μας στείλετε email στο info@drugalert.gr για οποιαδήποτε ερώτηση ή πρόβλημα. Απαντάμε συνήθως εντός 24 ωρών.",
        keywords: &["επικοινωνία", "email", "contact", "βοήθεια", "υποστήριξη"],
    },
];

fn score(entry: &FaqEntry, input: &str) -> u32 {
    let keyword_hits = entry
        .keywords
        .iter()
        .filter(|k| input.contains(&k.to_lowercase()))
        .count() as u32;

    let question = entry.question.to_lowercase();
    let word_hits = question
        .split(' ')
        .filter(|w| w.chars().count() > 3 && input.contains(w))
        .count() as u32;

    keyword_hits * 2 + word_hits
}

/// Highest-scoring entry of `catalogue`; the earliest wins a tie.
pub fn best_match<'a>(catalogue: &'a [FaqEntry], input: &str) -> Option<&'a FaqEntry> {
    let input = input.to_lowercase();
    let mut best: Option<(&FaqEntry, u32)> = None;

    for entry in catalogue {
        let s = score(entry, &input);
        if s > best.map_or(0, |(_, top)| top) {
            best = Some((entry, s));
        }
    }

    best.map(|(entry, _)| entry)
}

pub fn best_answer(input: &str) -> &'static str {
    best_match(FAQ_CATALOGUE, input).map_or(FALLBACK_ANSWER, |entry| entry.answer)
}

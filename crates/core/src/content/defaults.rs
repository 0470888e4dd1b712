use super::model::{
    AboutBook, Audience, Chapter, EmailCapture, Endorsement, FinalCta, Hero, HomeContent,
};

/// Launch copy for the book site, stored by the startup seed when no home
/// content exists yet.
pub fn default_home_content() -> HomeContent {
    HomeContent {
        hero: Hero {
            badge_text: "A New Medical Nonfiction".into(),
            title: "Beyond the Cure".into(),
            subtitle: "What Antibiotics Teach Us About Medicine, Mortality, and What It Means to Heal"
                .into(),
            description: "A deeply human exploration of antimicrobial resistance where science meets story, and each patient reminds us why medicine is both art and evidence".into(),
            primary_cta_text: "Buy the Book".into(),
            primary_cta_link: "#".into(),
            secondary_cta_text: "Get Free Safety Guide".into(),
            secondary_cta_link: "#".into(),
            availability_text: "Available on Amazon, Barnes & Noble, and independent bookstores"
                .into(),
            book_cover_image: "/bookcover.png".into(),
        },
        about_book: AboutBook {
            badge_text: "About the Book".into(),
            heading: "What is Beyond the Cure?".into(),
            paragraphs: vec![
                "Antibiotics have saved countless lives since their discovery, yet today we face a crisis of antimicrobial resistance that threatens to unravel decades of medical progress. Beyond the Cure is not just about the science; it's about the people behind the prescriptions".into(),
                "Through compelling patient stories and rigorous evidence, this book explores how we got here, what we can do differently, and why every antibiotic decision matters. From the ICU to the outpatient clinic, from policy debates to bedside conversations, you'll discover how medicine's most powerful tools require our most thoughtful stewardship".into(),
                "Written for anyone who has ever taken or prescribed an antibiotic, Beyond the Cure bridges the gap between academic medicine and the real world where healing happens".into(),
            ],
        },
        about_author: Default::default(),
        audiences: vec![
            audience(
                "Users",
                "Patients & Families",
                "Understand what questions to ask and why your antibiotic choices matter for you and for everyone.",
            ),
            audience(
                "Stethoscope",
                "Clinicians & Trainees",
                "Real cases and evidence-based frameworks to sharpen your antimicrobial decision-making.",
            ),
            audience(
                "Building2",
                "Hospitals & Stewardship Teams",
                "Practical insights to strengthen antimicrobial stewardship programs and improve patient outcomes.",
            ),
        ],
        chapters: vec![
            chapter(
                "01",
                "Poor Liver",
                "When the body's filter fails, every antibiotic choice becomes a calculation of risk.",
            ),
            chapter(
                "02",
                "The Resistance",
                "How bacteria evolve faster than we can develop new weapons against them.",
            ),
            chapter(
                "03",
                "Gut Feelings",
                "The microbiome revolution and why our internal ecosystem matters more than we thought.",
            ),
        ],
        endorsements: vec![
            Endorsement {
                quote: "A masterful blend of storytelling and science. Beyond the Cure is the book I wish I had when I started my career in infectious disease.".into(),
                author: "Brad Spellberg, MD".into(),
                title: "Chief Medical Officer, LA County + USC Medical Center".into(),
                featured: true,
            },
            Endorsement {
                quote: "Henry makes the invisible crisis of antimicrobial resistance visible and visceral. This book will change how you think about every prescription.".into(),
                author: "Sarah Chen, MD, MPH".into(),
                title: "Director of Antimicrobial Stewardship, Stanford Health".into(),
                featured: false,
            },
        ],
        email_capture: EmailCapture {
            title: "Free Antibiotic Safety Checklist".into(),
            description: "A practical guide to the questions you should ask before starting or stopping any antibiotic. Designed for patients and caregivers".into(),
            privacy_note: "We respect your privacy. Occasional updates about the book and antibiotic stewardship, unsubscribe anytime.".into(),
        },
        final_cta: FinalCta {
            title: "Ready to Go Beyond?".into(),
            description: "Whether you're a patient seeking answers, a clinician refining your practice, or an organization looking for a compelling speaker let's connect".into(),
            primary_cta_text: "Buy the Book".into(),
            primary_cta_link: "#".into(),
            secondary_cta_text: "Invite Henry to Speak".into(),
            secondary_cta_link: "#".into(),
            footer_note: String::new(),
        },
    }
}

fn audience(icon: &str, title: &str, description: &str) -> Audience {
    Audience {
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
    }
}

fn chapter(number: &str, title: &str, description: &str) -> Chapter {
    Chapter {
        number: number.into(),
        title: title.into(),
        description: description.into(),
    }
}

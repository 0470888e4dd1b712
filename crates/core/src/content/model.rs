use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The singleton document driving every public page section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeContent {
    pub hero: Hero,
    pub about_book: AboutBook,
    pub about_author: AboutAuthor,
    pub audiences: Vec<Audience>,
    pub chapters: Vec<Chapter>,
    pub endorsements: Vec<Endorsement>,
    pub email_capture: EmailCapture,
    pub final_cta: FinalCta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub badge_text: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub primary_cta_text: String,
    pub primary_cta_link: String,
    pub secondary_cta_text: String,
    pub secondary_cta_link: String,
    pub availability_text: String,
    pub book_cover_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutBook {
    pub badge_text: String,
    pub heading: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutAuthor {
    pub name: String,
    pub short_bio: String,
    pub long_bio: String,
    pub author_image: String,
    pub read_more_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Audience {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chapter {
    pub number: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endorsement {
    pub quote: String,
    pub author: String,
    pub title: String,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailCapture {
    pub title: String,
    pub description: String,
    pub privacy_note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalCta {
    pub title: String,
    pub description: String,
    pub primary_cta_text: String,
    pub primary_cta_link: String,
    pub secondary_cta_text: String,
    pub secondary_cta_link: String,
    pub footer_note: String,
}

/// Stored home content plus its write timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContentDocument {
    #[serde(flatten)]
    pub content: HomeContent,
    pub updated_at: DateTime<Utc>,
}

/// Section-level update. Present sections replace the stored ones; absent
/// sections and unknown keys are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContentPatch {
    pub hero: Option<Hero>,
    pub about_book: Option<AboutBook>,
    pub about_author: Option<AboutAuthor>,
    pub audiences: Option<Vec<Audience>>,
    pub chapters: Option<Vec<Chapter>>,
    pub endorsements: Option<Vec<Endorsement>>,
    pub email_capture: Option<EmailCapture>,
    pub final_cta: Option<FinalCta>,
}

impl HomeContentPatch {
    pub fn apply(self, content: &mut HomeContent) {
        if let Some(hero) = self.hero {
            content.hero = hero;
        }
        if let Some(about_book) = self.about_book {
            content.about_book = about_book;
        }
        if let Some(mut about_author) = self.about_author {
            // Photo fields are owned by the upload path; client values are ignored.
            about_author.photo_url = content.about_author.photo_url.take();
            about_author.photo_key = content.about_author.photo_key.take();
            content.about_author = about_author;
        }
        if let Some(audiences) = self.audiences {
            content.audiences = audiences;
        }
        if let Some(chapters) = self.chapters {
            content.chapters = chapters;
        }
        if let Some(endorsements) = self.endorsements {
            content.endorsements = endorsements;
        }
        if let Some(email_capture) = self.email_capture {
            content.email_capture = email_capture;
        }
        if let Some(final_cta) = self.final_cta {
            content.final_cta = final_cta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_replaces_only_present_sections() {
        let mut content = HomeContent::default();
        content.hero.title = "Old".into();
        content.chapters.push(Chapter {
            number: "01".into(),
            title: "Poor Liver".into(),
            description: String::new(),
        });

        let patch: HomeContentPatch = serde_json::from_value(json!({
            "hero": { "title": "New" },
            "_id": "ignored",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        patch.apply(&mut content);

        assert_eq!(content.hero.title, "New");
        assert_eq!(content.chapters.len(), 1);
    }

    #[test]
    fn author_text_edit_keeps_photo() {
        let mut content = HomeContent::default();
        content.about_author.photo_url = Some("https://cdn/authors/1-me.png".into());
        content.about_author.photo_key = Some("authors/1-me.png".into());

        let patch: HomeContentPatch =
            serde_json::from_value(json!({ "aboutAuthor": { "name": "Henry" } })).unwrap();
        patch.apply(&mut content);

        assert_eq!(content.about_author.name, "Henry");
        assert_eq!(content.about_author.photo_key.as_deref(), Some("authors/1-me.png"));
    }

    #[test]
    fn client_photo_fields_are_ignored() {
        let mut content = HomeContent::default();
        content.about_author.photo_url = Some("https://cdn/authors/1-me.png".into());
        content.about_author.photo_key = Some("authors/1-me.png".into());

        let patch: HomeContentPatch = serde_json::from_value(json!({
            "aboutAuthor": { "photoKey": "resources/patients/1-guide.pdf", "photoUrl": "" }
        }))
        .unwrap();
        patch.apply(&mut content);
        assert_eq!(content.about_author.photo_key.as_deref(), Some("authors/1-me.png"));
        assert_eq!(
            content.about_author.photo_url.as_deref(),
            Some("https://cdn/authors/1-me.png")
        );

        let mut empty = HomeContent::default();
        let patch: HomeContentPatch = serde_json::from_value(json!({
            "aboutAuthor": { "photoKey": "resources/patients/1-guide.pdf" }
        }))
        .unwrap();
        patch.apply(&mut empty);
        assert!(empty.about_author.photo_key.is_none());
    }

    #[test]
    fn document_serializes_camel_case_and_flat() {
        let doc = HomeContentDocument {
            content: HomeContent::default(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("aboutBook").is_some());
        assert!(value.get("finalCta").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value["aboutAuthor"].get("photoUrl").is_none());
    }
}

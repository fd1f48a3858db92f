use once_cell::sync::Lazy;
use regex::Regex;

/// The quiz assistant ends a failed question with
/// "Cliquez ici pour regarder la vidéo du Cours X.Y".
static VIDEO_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)cliquez ici pour regarder la vid[ée]o du cours (\d+)\.(\d+)").unwrap()
});

/// Course video the assistant pointed the student to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoLink {
    pub course_number: u32,
    pub part_number: u32,
}

/// All video suggestions in `text`, in order of appearance
pub fn video_links(text: &str) -> Vec<VideoLink> {
    VIDEO_LINK
        .captures_iter(text)
        .filter_map(|caps| {
            Some(VideoLink {
                course_number: caps.get(1)?.as_str().parse().ok()?,
                part_number: caps.get(2)?.as_str().parse().ok()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_links_in_order() {
        let text = "Mauvaise réponse. Cliquez ici pour regarder la vidéo du Cours 2.3\n\
                    Voir aussi : cliquez ici pour regarder la video du cours 1.1";
        assert_eq!(
            video_links(text),
            vec![
                VideoLink {
                    course_number: 2,
                    part_number: 3
                },
                VideoLink {
                    course_number: 1,
                    part_number: 1
                },
            ]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(video_links("Bonne réponse !").is_empty());
    }
}

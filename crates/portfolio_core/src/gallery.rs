use crate::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub repo: &'static str,
}

pub static PROJECTS: &[Project] = &[
    Project {
        title: "Neural Network-Based Approach to Detect and Filter Misleading Audio Segments in Classroom Automatic Transcription",
        image: "/assets/ciae.png",
        description: "Research project with PhD Roberto Araya: a neural network that detects audio segments which increase a transcriber's hallucinations.",
        repo: "https://www.mdpi.com/2076-3417/13/24/13243",
    },
    Project {
        title: "Podcast summarizer",
        image: "/assets/podcast_summarizer.png",
        description: "Generates technical summaries from videos and audio, built to query podcasts specialised in finance.",
        repo: "https://github.com/JorgeHewstone/Portfolio/tree/main/podcast_summarizer",
    },
    Project {
        title: "SudokuApp",
        image: "/assets/sudoku.jpg",
        description: "Personal application for playing Sudoku without ads.",
        repo: "https://github.com/JorgeHewstone/Portfolio/tree/main/SudokuApp",
    },
    Project {
        title: "AI portfolio",
        image: "/assets/sudoku.jpg",
        description: "This portfolio: a project gallery plus a chat that streams answers from a retrieval-augmented backend.",
        repo: "https://github.com/JorgeHewstone/Portfolio",
    },
];

/// Render every project as a card, in list order.
pub fn render_gallery(surface: &mut dyn Surface, projects: &[Project]) {
    for project in projects {
        surface.create_card(project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageId, Role};

    #[derive(Default)]
    struct Cards(Vec<&'static str>);

    impl Surface for Cards {
        fn create_card(&mut self, project: &Project) {
            self.0.push(project.title);
        }
        fn append_message(&mut self, _role: Role, _text: &str) -> MessageId {
            0
        }
        fn extend_message(&mut self, _id: MessageId, _text: &str) {}
        fn set_busy(&mut self, _busy: bool) {}
        fn show_diagnostic(&mut self, _text: &str) {}
    }

    #[test]
    fn cards_follow_list_order() {
        let mut cards = Cards::default();
        render_gallery(&mut cards, PROJECTS);
        let expected: Vec<_> = PROJECTS.iter().map(|p| p.title).collect();
        assert_eq!(cards.0, expected);
    }

    #[test]
    fn every_card_links_somewhere_different() {
        let mut repos: Vec<_> = PROJECTS.iter().map(|p| p.repo).collect();
        repos.sort_unstable();
        repos.dedup();
        assert_eq!(repos.len(), PROJECTS.len());
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut cards = Cards::default();
        render_gallery(&mut cards, &[]);
        assert!(cards.0.is_empty());
    }
}

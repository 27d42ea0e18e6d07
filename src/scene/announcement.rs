use crate::{
    composition::model::AnnouncementDef,
    effects::transitions::{SlideDirection, TransitionSpec},
    foundation::error::ReeltimeResult,
    scene::model::Scene,
    scene::slides::{CategoryScene, CommitScene, IntroScene, OutroScene},
    timeline::schedule::{Timeline, TimelineItem},
};

/// Schedule the announcement slides.
///
/// Clip names are `intro`, `category-{c}`, `commit-{c}-{i}` and `outro`. The intro and the last
/// commit of every category but the final one slide out to the left; every other boundary fades.
pub fn announcement_timeline(def: &AnnouncementDef) -> ReeltimeResult<Timeline<Box<dyn Scene>>> {
    let slide = TransitionSpec::slide(SlideDirection::FromRight, def.transition_frames);
    let fade = TransitionSpec::fade(def.transition_frames);

    let mut entries: Vec<(TimelineItem, Box<dyn Scene>)> = Vec::new();
    entries.push(entry(
        TimelineItem::new("intro", def.intro_frames).then(slide),
        IntroScene::new(
            def.intro_frames,
            def.title.as_str(),
            def.subtitle.as_str(),
        )?,
    ));

    let last_category = def.categories.len().saturating_sub(1);
    for (ci, category) in def.categories.iter().enumerate() {
        let count = category.commits.len();
        entries.push(entry(
            TimelineItem::new(format!("category-{ci}"), def.category_frames).then(fade),
            CategoryScene::new(def.category_frames, category.name.as_str(), count)?,
        ));

        for (i, commit) in category.commits.iter().enumerate() {
            let leaves_category = i + 1 == count && ci != last_category;
            let next = if leaves_category { slide } else { fade };
            entries.push(entry(
                TimelineItem::new(format!("commit-{ci}-{i}"), def.commit_frames).then(next),
                CommitScene::new(
                    def.commit_frames,
                    commit.message.as_str(),
                    commit.kind.as_str(),
                    i + 1,
                    count,
                )?,
            ));
        }
    }

    entries.push(entry(
        TimelineItem::new("outro", def.outro_frames),
        OutroScene::new(
            def.outro_frames,
            def.total_commits(),
            def.cta_label.as_str(),
        )?,
    ));

    Timeline::new(entries)
}

fn entry(item: TimelineItem, scene: impl Scene + 'static) -> (TimelineItem, Box<dyn Scene>) {
    (item, Box::new(scene))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/announcement.rs"]
mod tests;

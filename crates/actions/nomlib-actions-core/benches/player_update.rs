//! Cost of one `ActionPlayer::update` across many concurrent action trees.
//!
//! ```bash
//! cargo bench -p nomlib-actions-core --bench player_update
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nomlib_actions::{
    ActionExt, ActionPlayer, Drawable, FadeAlphaAction, GroupAction, MoveAction,
    RepeatForeverAction, ScaleByAction, SequenceAction, SharedDrawable, TimingCurve, Vec2,
};

#[derive(Default)]
struct Sprite {
    position: Vec2,
    alpha: u8,
    scale: Vec2,
    frame: u32,
}

impl Drawable for Sprite {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
    fn alpha(&self) -> u8 {
        self.alpha
    }
    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }
    fn scale(&self) -> Vec2 {
        self.scale
    }
    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
    fn frame(&self) -> u32 {
        self.frame
    }
    fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }
}

/// A looping tree per sprite: slide and scale together, then fade back and forth.
fn populate(count: usize) -> (ActionPlayer, Vec<SharedDrawable>) {
    let mut player = ActionPlayer::new();
    let mut sprites = Vec::with_capacity(count);
    for i in 0..count {
        let sprite: SharedDrawable = Rc::new(RefCell::new(Sprite {
            alpha: 255,
            scale: Vec2::ONE,
            ..Sprite::default()
        }));
        let tree = SequenceAction::new(vec![
            GroupAction::new(vec![
                MoveAction::move_by(&sprite, (32.0, 0.0), 0.5).boxed(),
                ScaleByAction::new(&sprite, (1.5, 1.5), 0.5).boxed(),
            ])
            .with_timing_curve(TimingCurve::QuadInOut)
            .boxed(),
            FadeAlphaAction::fade_out(&sprite, 0.25).boxed(),
            FadeAlphaAction::fade_in(&sprite, 0.25).boxed(),
        ]);
        player.run_named(RepeatForeverAction::new(tree.boxed()).boxed(), format!("sprite-{i}"));
        sprites.push(sprite);
    }
    (player, sprites)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("player_update");
    for count in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (mut player, _sprites) = populate(count);
            b.iter(|| black_box(player.update(black_box(1.0 / 60.0))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);

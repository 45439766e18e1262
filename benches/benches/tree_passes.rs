// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kiln_host::Rect;
use kiln_host::input::{InputSnapshot, MouseButtons};
use kiln_host::platform::FixedClock;
use kiln_host::render::NullSink;
use kiln_widgets::Gui;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: i32) -> i32 {
        (self.next_u64() % n as u64) as i32
    }
}

/// `panels` scrolling frames, each with a grid of buttons, a field, a slider
/// and a list of `rows` entries.
fn gen_tree(panels: usize, rows: usize) -> Gui {
    let mut gui = Gui::new(Rect::new(0, 0, 1920, 1080));
    let root = gui.root();
    let mut rng = Rng(0xCAFE_F00D_DEAD_BEEF);
    for p in 0..panels {
        let x = rng.below(1700);
        let y = rng.below(900);
        let f = gui
            .add_frame(root, &format!("panel{p}"), Rect::new(x, y, 200, 160))
            .unwrap();
        gui.set_actual_size(f, 400, 20 * rows as i32).unwrap();
        for b in 0..16 {
            let bx = (b % 4) * 50;
            let by = (b / 4) * 24;
            gui.add_button(f, &format!("b{b}"), Rect::new(bx, by, 48, 22), "Ok")
                .unwrap();
        }
        gui.add_field(f, "name", Rect::new(0, 100, 150, 20), 32).unwrap();
        gui.add_slider(f, "volume", Rect::new(0, 130, 150, 10), 0.0, 1.0)
            .unwrap();
        for r in 0..rows {
            gui.add_entry(f, &format!("row{r}"), "item").unwrap();
        }
    }
    gui
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    for &panels in &[8_usize, 64, 256] {
        group.throughput(Throughput::Elements(panels as u64));
        group.bench_function(format!("hover_tick_{panels}"), |b| {
            let mut gui = gen_tree(panels, 32);
            let mut input = InputSnapshot::at(960, 540);
            let mut t = 0;
            b.iter(|| {
                t += 16;
                gui.tick(&mut input, &FixedClock(t));
                black_box(gui.last_highlight().is_some())
            });
        });
        group.bench_function(format!("click_and_wheel_{panels}"), |b| {
            b.iter_batched(
                || {
                    let mut input = InputSnapshot::at(960, 540);
                    input.press(MouseButtons::LEFT);
                    input.scroll(0, 1);
                    (gen_tree(panels, 32), input)
                },
                |(mut gui, mut input)| {
                    gui.tick(&mut input, &FixedClock(0));
                    black_box(gui.widget_count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    for &panels in &[8_usize, 64, 256] {
        group.throughput(Throughput::Elements(panels as u64));
        group.bench_function(format!("null_sink_{panels}"), |b| {
            let gui = gen_tree(panels, 32);
            b.iter(|| gui.draw(black_box(&mut NullSink)));
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_tree_64", |b| b.iter(|| black_box(gen_tree(64, 32))));
}

criterion_group!(benches, bench_process, bench_draw, bench_build);
criterion_main!(benches);

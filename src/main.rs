use arrayvec::ArrayVec;
use bitvec::prelude::*;
use itertools::Itertools;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter::zip;

fn day1(part: u8, input: &str) -> String {
    let calories = input.trim().split("\n\n").map(|elf|
        elf.lines().map(|line| line.parse::<u64>().expect(line)).sum::<u64>()
    );

    if part == 1 {
        calories.max().expect("empty input").to_string()
    } else {
        calories.sorted_unstable().rev().take(3).sum::<u64>().to_string()
    }
}

fn day2(part: u8, input: &str) -> String {
    input.trim().lines().map(|line| {
        let (theirs, mine) = line.split_once(' ').expect(line);
        let theirs = theirs.as_bytes()[0] - b'A';
        let code = mine.as_bytes()[0] - b'X';
        // shapes are 0/1/2 rock/paper/scissors, outcomes 0/1/2 loss/draw/win;
        // each shape beats the one below it mod 3
        let (shape, outcome) = if part == 1 {
            (code, (4 + code - theirs) % 3)
        } else {
            ((theirs + 2 + code) % 3, code)
        };
        (shape + 1 + 3 * outcome) as u64
    }).sum::<u64>().to_string()
}

fn day3(part: u8, input: &str) -> String {
    fn priority(item: u8) -> u64 {
        match item {
            b'a' ..= b'z' => (item - b'a') as u64 + 1,
            b'A' ..= b'Z' => (item - b'A') as u64 + 27,
            _ => panic!("unexpected item {}", item as char)
        }
    }

    if part == 1 {
        input.trim().lines().map(|line| {
            let (left, right) = line.as_bytes().split_at(line.len() / 2);
            let left: FxHashSet<u8> = left.iter().copied().collect();
            let shared = right.iter().copied().find(|item| left.contains(item)).expect(line);
            priority(shared)
        }).sum::<u64>().to_string()
    } else {
        input.trim().lines().tuples().map(|(elf1, elf2, elf3)| {
            let elf1: FxHashSet<u8> = elf1.bytes().collect();
            let elf2: FxHashSet<u8> = elf2.bytes().collect();
            let badge = elf3.bytes().find(|item|
                elf1.contains(item) && elf2.contains(item)
            ).expect(elf3);
            priority(badge)
        }).sum::<u64>().to_string()
    }
}

fn day4(part: u8, input: &str) -> String {
    input.trim().lines().filter(|line| {
        let (a1, a2, b1, b2) = line.split(['-', ','])
            .map(|n| n.parse::<u32>().expect(line))
            .collect_tuple().expect(line);
        if part == 1 {
            a1 <= b1 && b2 <= a2 || b1 <= a1 && a2 <= b2
        } else {
            a1 <= b2 && b1 <= a2
        }
    }).count().to_string()
}

fn day5(part: u8, input: &str) -> String {
    let (header, moves) = input.split_once("\n\n").expect("missing blank line");
    let mut header_lines = header.lines().rev();
    let labels = header_lines.next().expect("missing stack labels");
    let mut stacks: Vec<Vec<u8>> = vec![vec![]; labels.split_whitespace().count()];
    for line in header_lines {
        // each stack occupies four columns: "[X] "
        for (stack, chunk) in zip(&mut stacks, line.as_bytes().chunks(4)) {
            if chunk[1] != b' ' {stack.push(chunk[1])}
        }
    }

    let move_regex = Regex::new(r"move (\d+) from (\d+) to (\d+)").unwrap();
    for m in move_regex.captures_iter(moves) {
        let count = m[1].parse::<usize>().unwrap();
        let orig = m[2].parse::<usize>().unwrap() - 1;
        let dest = m[3].parse::<usize>().unwrap() - 1;
        let split_at = stacks[orig].len() - count;
        let mut lifted = stacks[orig].split_off(split_at);
        // CrateMover 9000 moves one crate at a time, reversing the block
        if part == 1 {lifted.reverse()}
        stacks[dest].extend(lifted);
    }

    stacks.iter().map(|stack| *stack.last().expect("empty stack") as char).collect()
}

fn day6(part: u8, input: &str) -> String {
    let marker_len = if part == 1 {4} else {14};
    let start = input.trim().as_bytes().windows(marker_len)
        .position(|window| window.iter().all_unique())
        .expect("no marker found");
    (start + marker_len).to_string()
}

fn day7(part: u8, input: &str) -> String {
    // arena of directories; index 0 is the root
    let mut parents: Vec<usize> = vec![0];
    let mut children: Vec<FxHashMap<&str, usize>> = vec![FxHashMap::default()];
    let mut file_sizes: Vec<u64> = vec![0];
    let mut current = 0;

    for line in input.trim().lines() {
        match line.split_whitespace().collect::<Vec<_>>()[..] {
            ["$", "cd", "/"] => current = 0,
            ["$", "cd", ".."] => current = parents[current],
            ["$", "cd", name] => current = children[current][name],
            ["$", "ls"] => (),
            ["dir", name] => {
                let child = parents.len();
                parents.push(current);
                children.push(FxHashMap::default());
                file_sizes.push(0);
                children[current].insert(name, child);
            },
            [size, _name] => file_sizes[current] += size.parse::<u64>().expect(line),
            _ => panic!("cannot parse line {}", line)
        }
    }

    // children always follow their parent in the arena, so a reverse pass
    // rolls every directory's total up through its ancestors
    let mut totals = file_sizes;
    for dir in (1 .. totals.len()).rev() {
        totals[parents[dir]] += totals[dir];
    }

    if part == 1 {
        totals.iter().filter(|&&size| size <= 100_000).sum::<u64>().to_string()
    } else {
        let needed = 30_000_000 - (70_000_000 - totals[0]);
        totals.iter().filter(|&&size| size >= needed).min().expect("root too small").to_string()
    }
}

fn day8(part: u8, input: &str) -> String {
    let grid: Vec<&[u8]> = input.trim().lines().map(|line| line.as_bytes()).collect();
    let grid = &grid;
    let rows = grid.len();
    let cols = grid[0].len();

    if part == 1 {
        let mut visible = vec![vec![false; cols]; rows];
        for ri in 0 .. rows {
            let mut mark = |line: &mut dyn Iterator<Item = usize>| {
                let mut tallest = None;
                for ci in line {
                    if Some(grid[ri][ci]) > tallest {
                        visible[ri][ci] = true;
                        tallest = Some(grid[ri][ci]);
                    }
                }
            };
            mark(&mut (0 .. cols));
            mark(&mut (0 .. cols).rev());
        }
        for ci in 0 .. cols {
            let mut mark = |line: &mut dyn Iterator<Item = usize>| {
                let mut tallest = None;
                for ri in line {
                    if Some(grid[ri][ci]) > tallest {
                        visible[ri][ci] = true;
                        tallest = Some(grid[ri][ci]);
                    }
                }
            };
            mark(&mut (0 .. rows));
            mark(&mut (0 .. rows).rev());
        }
        visible.iter().flatten().filter(|&&v| v).count().to_string()
    } else {
        (1 .. rows - 1).flat_map(|ri| (1 .. cols - 1).map(move |ci| {
            let height = grid[ri][ci];
            let viewing_distance = |dr: i64, dc: i64| {
                let mut seen = 0u64;
                let (mut r, mut c) = (ri as i64 + dr, ci as i64 + dc);
                while (0 .. rows as i64).contains(&r) && (0 .. cols as i64).contains(&c) {
                    seen += 1;
                    if grid[r as usize][c as usize] >= height {break}
                    r += dr;
                    c += dc;
                }
                seen
            };
            viewing_distance(-1, 0) * viewing_distance(1, 0) *
                viewing_distance(0, -1) * viewing_distance(0, 1)
        })).max().expect("grid too small").to_string()
    }
}

fn day9(part: u8, input: &str) -> String {
    let knot_count = if part == 1 {2} else {10};
    let mut knots: ArrayVec<(i64, i64), 10> = (0 .. knot_count).map(|_| (0, 0)).collect();
    let mut tail_positions = FxHashSet::default();
    tail_positions.insert((0, 0));

    for line in input.trim().lines() {
        let (direction, steps) = line.split_once(' ').expect(line);
        let (dx, dy) = match direction {
            "U" => (0, 1), "R" => (1, 0), "D" => (0, -1), "L" => (-1, 0),
            _ => panic!("unexpected direction {}", direction)
        };
        for _ in 0 .. steps.parse::<u32>().expect(line) {
            knots[0].0 += dx;
            knots[0].1 += dy;
            for i in 1 .. knots.len() {
                let (hx, hy) = knots[i - 1];
                let (tx, ty) = knots[i];
                // a knot only moves once its leader is more than one step away
                if (hx - tx).pow(2) + (hy - ty).pow(2) >= 4 {
                    knots[i] = (tx + (hx - tx).signum(), ty + (hy - ty).signum());
                }
            }
            tail_positions.insert(*knots.last().unwrap());
        }
    }

    tail_positions.len().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Noop,
    Addx(i64),
}

impl Instruction {
    fn cycles(self) -> u32 {
        match self {
            Instruction::Noop => 1,
            Instruction::Addx(_) => 2,
        }
    }

    fn delta(self) -> i64 {
        match self {
            Instruction::Noop => 0,
            Instruction::Addx(immediate) => immediate,
        }
    }
}

fn parse_program(input: &str) -> impl Iterator<Item = Instruction> + '_ {
    input.trim().lines().filter_map(|line| {
        if line == "noop" {
            Some(Instruction::Noop)
        } else {
            line.strip_prefix("addx ")?.parse().ok().map(Instruction::Addx)
        }
    })
}

trait Probe {
    fn on_tick(&mut self, cycle: u32, x: i64);
}

const SAMPLE_CYCLES: [u32; 6] = [20, 60, 100, 140, 180, 220];

#[derive(Default)]
struct SignalStrengthProbe {
    strength: i64,
}

impl Probe for SignalStrengthProbe {
    fn on_tick(&mut self, cycle: u32, x: i64) {
        if SAMPLE_CYCLES.contains(&cycle) {
            self.strength += cycle as i64 * x;
        }
    }
}

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;

struct DrawProbe {
    screen: BitArr!(for 240),
}

impl DrawProbe {
    fn new() -> DrawProbe {
        DrawProbe {screen: bitarr![0; 240]}
    }

    fn render(&self) -> String {
        self.screen[.. SCREEN_WIDTH * SCREEN_HEIGHT].chunks(SCREEN_WIDTH).map(|row|
            row.iter().map(|lit| if *lit {'#'} else {'.'}).collect::<String>()
        ).join("\n")
    }
}

impl Probe for DrawProbe {
    fn on_tick(&mut self, cycle: u32, x: i64) {
        let pixel = cycle as usize - 1;
        if pixel >= SCREEN_WIDTH * SCREEN_HEIGHT {return}
        let column = (pixel % SCREEN_WIDTH) as i64;
        if (x - column).abs() <= 1 {
            self.screen.set(pixel, true);
        }
    }
}

struct Cpu<'a, I: Iterator<Item = Instruction>> {
    x: i64,
    cycle: u32,
    program: I,
    // in-flight instruction and the cycles it has left
    current: Option<(Instruction, u32)>,
    probes: Vec<&'a mut dyn Probe>,
}

impl<'a, I: Iterator<Item = Instruction>> Cpu<'a, I> {
    fn new(mut program: I, probes: Vec<&'a mut dyn Probe>) -> Cpu<'a, I> {
        let current = program.next().map(|instruction| (instruction, instruction.cycles()));
        Cpu {x: 1, cycle: 0, program, current, probes}
    }

    fn tick(&mut self) {
        let Some((instruction, remaining)) = self.current else {return};
        self.cycle += 1;
        // probes observe the register before the in-flight instruction lands
        for probe in &mut self.probes {
            probe.on_tick(self.cycle, self.x);
        }
        if remaining == 1 {
            self.x += instruction.delta();
            self.current = self.program.next().map(|next| (next, next.cycles()));
        } else {
            self.current = Some((instruction, remaining - 1));
        }
    }

    fn run(&mut self) {
        while self.current.is_some() {
            self.tick();
        }
    }
}

fn day10(part: u8, input: &str) -> String {
    if part == 1 {
        let mut signal = SignalStrengthProbe::default();
        Cpu::new(parse_program(input), vec![&mut signal]).run();
        signal.strength.to_string()
    } else {
        let mut screen = DrawProbe::new();
        Cpu::new(parse_program(input), vec![&mut screen]).run();
        screen.render()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let days = [
      day1, day2, day3, day4, day5, day6, day7, day8, day9, day10
    ];

    let args = std::env::args().collect::<Vec<_>>();
    let (day_arg, part_arg, fname) = match &args[..] {
        [_, day_arg, part_arg] => (day_arg, part_arg, format!("day{}.in", day_arg)),
        [_, day_arg, test_arg, part_arg] => (day_arg, part_arg, format!("day{}test{}.in", day_arg, test_arg)),
        _ => {
            println!("exactly two or three arguments expected - day number, optionally test number and 1/2 for part");
            std::process::exit(1);
        }
    };

    assert!(part_arg == "1" || part_arg == "2");
    let day: usize = day_arg.parse()?;
    let input = std::fs::read_to_string(dbg!(fname))?;
    let time = std::time::Instant::now();
    println!("{}", days[day - 1](part_arg.parse()?, &input));
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}

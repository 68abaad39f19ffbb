use cubpack::prelude::*;

fn guillotine(w: i64, h: i64, d: i64, rot: bool) -> GuillotineBin<i64, String> {
    GuillotineBin::new(w, h, d, rot, GuillotineSelector::Bssf, GuillotineSplitRule::Sas)
}

fn maxcubs(w: i64, h: i64, d: i64, rot: bool) -> MaxCubsBin<i64, String> {
    MaxCubsBin::new(w, h, d, rot, MaxCubsSelector::Bssf)
}

#[test]
fn s1_single_bin_exact_fit_guillotine() {
    let mut bin = guillotine(10, 10, 10, false);
    let placed = bin.add_cub(10, 10, 10, None).expect("exact fit must place");
    assert_eq!((placed.x, placed.y, placed.z), (0, 0, 0));
    assert_eq!((placed.width, placed.height, placed.depth), (10, 10, 10));
    assert!(bin.sections().is_empty());
}

#[test]
fn s1_single_bin_exact_fit_maxcubs() {
    let mut bin = maxcubs(10, 10, 10, false);
    let placed = bin.add_cub(10, 10, 10, None).expect("exact fit must place");
    assert_eq!((placed.x, placed.y, placed.z), (0, 0, 0));
    assert!(bin.max_cubs().is_empty());
}

#[test]
fn s2_guillotine_horizontal_split_no_merge() {
    let mut bin = guillotine(10, 10, 10, false).with_merge(false);
    let placed = bin.add_cub(4, 4, 4, None).expect("must fit");
    assert_eq!((placed.x, placed.y, placed.z), (0, 0, 0));

    let expected = [
        Cuboid::<i64, String>::new(0, 4, 0, 10, 6, 10),
        Cuboid::<i64, String>::new(4, 0, 0, 6, 4, 10),
        Cuboid::<i64, String>::new(0, 0, 4, 4, 4, 6),
    ];
    let sections = bin.sections();
    assert_eq!(sections.len(), expected.len());
    for e in expected.iter() {
        assert!(sections.contains(e), "missing expected section {e:?}");
    }
}

#[test]
fn s3_maxcubs_five_way_split() {
    let mut bin = maxcubs(10, 10, 10, false);
    let placed = bin.add_cub(4, 4, 4, None).expect("must fit");
    assert_eq!((placed.x, placed.y, placed.z), (0, 0, 0));

    let expected = [
        Cuboid::<i64, String>::new(4, 0, 0, 6, 10, 10),
        Cuboid::<i64, String>::new(0, 4, 0, 10, 6, 10),
        Cuboid::<i64, String>::new(0, 0, 4, 4, 4, 6),
    ];
    let cubs = bin.max_cubs();
    assert_eq!(cubs.len(), expected.len(), "left/bottom slabs are zero-width and must be omitted");
    for e in expected.iter() {
        assert!(cubs.contains(e), "missing expected maximal cuboid {e:?}");
    }
}

#[test]
fn s4_bnf_bin_exhaust() {
    let cfg = PackerConfig {
        mode: Mode::Online,
        bin_algo: BinAlgo::Bnf,
        sort_order: SortOrder::None,
        rotation: true,
    };
    let make = |w, h, d, rot| guillotine(w, h, d, rot);
    let mut packer = new_packer(&cfg, make).unwrap();
    packer.add_bin(5, 5, 5, 1);
    packer.add_bin(5, 5, 5, 1);

    assert!(packer.add_cub(5, 5, 5, None).unwrap().is_some());
    assert!(packer.add_cub(5, 5, 5, None).unwrap().is_some());
    assert!(packer.add_cub(5, 5, 5, None).unwrap().is_none());

    assert_eq!(packer.len(), 2);
    assert_eq!(packer.cub_list().len(), 2);
}

#[test]
fn s5_bbf_prefers_the_tighter_fitness() {
    // Two open bins (10,10,10) and (6,6,6); BBF chooses the open bin with
    // the lowest fitness score for a (5,5,5) item: the (6,6,6) bin's
    // short-side leftover (1) beats the (10,10,10) bin's (5).
    let big = maxcubs(10, 10, 10, true);
    let small = maxcubs(6, 6, 6, true);

    let big_fitness = big.fitness(5, 5, 5).expect("fits the big bin");
    let small_fitness = small.fitness(5, 5, 5).expect("fits the small bin");

    assert_eq!(small_fitness, 1);
    assert_eq!(big_fitness, 5);
    assert!(small_fitness < big_fitness);
}

#[test]
fn s6_global_fitness_driven_order_not_insertion_order() {
    // Bin (10,10,10), items queued as [(10,1,1),(9,9,9)] with sorting
    // disabled. Global doesn't honor queue order: at every step it places
    // whichever remaining item has the best (lowest) fitness against the
    // currently open bin. Against a fresh bin, (10,1,1) has fitness 0
    // (min(10-10,10-1,10-1)) versus (9,9,9)'s fitness 1
    // (min(10-9,10-9,10-9)), so (10,1,1) is placed first even though it
    // was queued first and is a much flatter box; (9,9,9) then fills the
    // (0,1,0,10,9,10) slab left behind.
    let cfg = PackerConfig {
        mode: Mode::Offline,
        bin_algo: BinAlgo::Global,
        sort_order: SortOrder::None,
        rotation: true,
    };
    let make = |w, h, d, rot| guillotine(w, h, d, rot);
    let mut packer = new_packer(&cfg, make).unwrap();
    packer.add_bin(10, 10, 10, 1);
    packer.queue_cub(10, 1, 1, None).unwrap();
    packer.queue_cub(9, 9, 9, None).unwrap();
    packer.pack().unwrap();

    assert_eq!(packer.cub_list().len(), 2);
    let bin = packer.get(0).unwrap();
    let placed = bin.placed();
    assert_eq!(placed.len(), 2);

    let flat = placed.iter().find(|c| c.width == 10 && c.height == 1).expect("(10,1,1) must be placed");
    assert_eq!((flat.x, flat.y, flat.z), (0, 0, 0));

    let cube = placed.iter().find(|c| c.width == 9).expect("(9,9,9) must be placed");
    assert_eq!((cube.x, cube.y, cube.z), (0, 1, 0));
}

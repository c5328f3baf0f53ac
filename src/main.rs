use std::io::Write;

use mazegraph::{
    config::Config,
    game::{Direction, MazeGame},
    generators::Algorithm,
    logging,
    persist::SavedMaze,
    random::RngSource,
    render,
};

fn read_line(input: &mut String) -> std::io::Result<bool> {
    input.clear();
    Ok(std::io::stdin().read_line(input)? > 0)
}

fn main() -> mazegraph::Result<()> {
    let config = Config::from_env()?;
    let _log_guard = logging::init(&config)?;
    let mut rng = RngSource::new(config.seed);
    let mut input = String::new();

    // `mazegraph <file.json>` resumes a saved maze
    let (mut game, algorithm, name) = match std::env::args().nth(1) {
        Some(path) => {
            let saved = SavedMaze::load(&path)?;
            let (algorithm, name) = (saved.algorithm, saved.name.clone());
            (saved.into_game()?, algorithm, name)
        }
        None => {
            println!("Enter maze dimensions (width height), each at least 2:");
            read_line(&mut input)?;

            // Parse the input dimensions
            let dims = input
                .split_whitespace()
                .take(2)
                .filter_map(|s| s.parse::<usize>().ok())
                .collect::<Vec<_>>();

            if dims.len() != 2 {
                eprintln!("Please enter two valid numbers for width and height.");
                return Ok(());
            }

            let (width, height) = (dims[0], dims[1]);
            if width < 2 || height < 2 {
                eprintln!("Width and height must be at least 2.");
                return Ok(());
            }

            // Let user select the algorithm
            println!("Select maze generation algorithm:");
            for (idx, algorithm) in Algorithm::ALL.iter().enumerate() {
                println!("{}. {}", idx + 1, algorithm);
            }
            read_line(&mut input)?;
            let algorithm = match input.trim().parse::<usize>() {
                Ok(n) if (1..=Algorithm::ALL.len()).contains(&n) => Algorithm::ALL[n - 1],
                _ => match input.parse::<Algorithm>() {
                    Ok(algorithm) => algorithm,
                    Err(e) => {
                        eprintln!("Invalid selection: {}", e);
                        return Ok(());
                    }
                },
            };

            let mut game = MazeGame::new();
            game.generate(algorithm, width, height, None, None, false, &mut rng)?;
            (game, algorithm, format!("{}x{} {}", width, height, algorithm))
        }
    };

    play(&mut game, &mut input)?;

    println!("Save this maze? Enter a file name, or leave empty to skip:");
    if read_line(&mut input)? && !input.trim().is_empty() {
        SavedMaze::from_game(name, algorithm, &game).save(input.trim())?;
        println!("Saved to {}", input.trim());
    }
    Ok(())
}

/// Reads moves until the exit is reached, the user quits, or stdin closes.
fn play(game: &mut MazeGame, input: &mut String) -> mazegraph::Result<()> {
    let mut stdout = std::io::stdout();
    loop {
        render::write_maze(&mut stdout, game.graph(), game.player_node())?;
        if game.is_solved() {
            println!("Exit reached!");
            return Ok(());
        }

        println!("Move with w/a/s/d (several at once are fine), q to stop:");
        stdout.flush()?;
        if !read_line(input)? {
            return Ok(());
        }

        for key in input.trim().chars() {
            if key == 'q' {
                return Ok(());
            }
            let Some(direction) = Direction::from_key(key) else {
                println!("Unknown move '{}'", key);
                break;
            };
            if !game.move_player(direction) {
                println!("Blocked going {:?}.", direction);
                break;
            }
            if game.is_solved() {
                break;
            }
        }
    }
}
